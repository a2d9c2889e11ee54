use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use natter_client::{
    api::{Action, Comment},
    Applied, CommentTree, Order, Outcome, SequentialIds, TreeConfig,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Seed comments, as a JSON list
    #[structopt(long, env = "NATTER_SEED", parse(from_os_str))]
    seed: Option<PathBuf>,

    /// Tree configuration, as a JSON object
    #[structopt(long, env = "NATTER_CONFIG", parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Replay a JSON list of actions, then print the resulting tree
    Run {
        #[structopt(parse(from_os_str))]
        script: PathBuf,
    },

    /// List top-level comments
    List {
        /// newest, oldest or popular
        #[structopt(long, default_value = "newest")]
        order: Order,
    },
}

fn read_json<T: for<'de> serde::Deserialize<'de>>(path: &Path, what: &str) -> anyhow::Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {what} from {path:?}"))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing {what} from {path:?}"))
}

fn load_tree(seed: Option<&Path>, config: Option<&Path>) -> anyhow::Result<CommentTree> {
    let config = match config {
        Some(path) => read_json::<TreeConfig>(path, "tree configuration")?,
        None => TreeConfig::default(),
    };
    config.validate().context("validating tree configuration")?;
    let comments = match seed {
        Some(path) => read_json::<Vec<Comment>>(path, "seed comments")?,
        None => Vec::new(),
    };
    CommentTree::from_comments(comments, config).context("building seed tree")
}

fn run(mut tree: CommentTree, actions: Vec<Action>) -> CommentTree {
    let mut ids = SequentialIds::after("c", &tree);
    for (step, action) in actions.into_iter().enumerate() {
        if let Err(err) = action.validate() {
            tracing::warn!(step, %err, "skipping invalid action");
            continue;
        }
        let Applied { tree: next, outcome } = tree.apply(&mut ids, action);
        match &outcome {
            Outcome::NotFound(err) => tracing::warn!(step, %err, "action had no effect"),
            outcome => tracing::info!(step, ?outcome, "applied action"),
        }
        tree = next;
    }
    tree
}

fn render_list(tree: &CommentTree, order: Order) -> String {
    let mut out = String::new();
    for c in tree.sorted(order) {
        let reactions = c
            .reactions
            .iter()
            .filter(|r| r.count > 0)
            .map(|r| format!(" {}{}", r.emoji, r.count))
            .collect::<String>();
        out.push_str(&format!(
            "{} {}{}: {} [{} replies]{}\n",
            c.id.0,
            c.author.name,
            if c.is_edited { " (edited)" } else { "" },
            c.content,
            c.reply_count(),
            reactions,
        ));
    }
    out
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let tree = load_tree(opt.seed.as_deref(), opt.config.as_deref())?;

    match opt.cmd {
        Command::Run { script } => {
            let actions = read_json::<Vec<Action>>(&script, "action script")?;
            let tree = run(tree, actions);
            let json = serde_json::to_string_pretty(&tree).context("serializing final tree")?;
            println!("{json}");
        }
        Command::List { order } => print!("{}", render_list(&tree, order)),
    }

    Ok(())
}
