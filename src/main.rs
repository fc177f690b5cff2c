use clap::{Parser, Subcommand};
use colored::Colorize;
use is_terminal::IsTerminal;
use jot::LOG_ENV;
use jot::areas::repository::Repository;
use jot::error::RepositoryError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jot",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control engine",
    long_about = "jot keeps snapshots of a working directory as content-addressed objects, \
    links them into a commit history with branches, and moves the working directory \
    to any point of that history, merging branches on demand.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short = 'C',
        long = "work-tree",
        global = true,
        help = "Run as if jot was started in this directory"
    )]
    work_tree: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Record the current content of files and stage them",
        long_about = "This command records modified files, or the modified files below a directory, \
        and stages them for the next commit."
    )]
    Add {
        #[arg(required = true, help = "The files or directories to add")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "rm",
        about = "Stop tracking files",
        long_about = "This command forgets every recorded version of the given files, \
        leaving the copies in the working tree untouched."
    )]
    Rm {
        #[arg(required = true, help = "The files or directories to stop tracking")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command commits the staged files, or only the listed files when any are given."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
        #[arg(index = 2, help = "Commit only these files")]
        paths: Vec<PathBuf>,
    },
    #[command(name = "status", about = "Show the state of the working tree")]
    Status,
    #[command(
        name = "log",
        about = "Show the history of HEAD",
        long_about = "This command lists the first-parent history of HEAD, newest first, \
        down to the given revision when one is specified."
    )]
    Log {
        #[arg(index = 1, help = "Stop after this revision")]
        from: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch or commit, or discard changes to files",
        long_about = "With a revision, this command moves the working tree and HEAD to it. \
        With `-- <paths>`, it throws away the pending changes of those files."
    )]
    Checkout {
        #[arg(
            required_unless_present = "paths",
            conflicts_with = "paths",
            help = "The branch or commit to check out"
        )]
        revision: Option<String>,
        #[arg(last = true, help = "Discard changes to these files")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to a revision",
        long_about = "This command moves the current branch and the working tree to the given revision, \
        deleting the commits no branch can reach any more."
    )]
    Reset {
        #[arg(index = 1, help = "The branch or commit to reset to")]
        revision: String,
    },
    #[command(
        name = "branch",
        about = "List, create or remove branches",
        args_conflicts_with_subcommands = true
    )]
    Branch {
        #[command(subcommand)]
        action: Option<BranchAction>,
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the current branch",
        long_about = "This command merges the given branch into the current one. \
        When conflicts are found, resolve them and run `merge --continue`."
    )]
    Merge {
        #[arg(index = 1, required_unless_present = "continue_merge", help = "The branch to merge")]
        branch: Option<String>,
        #[arg(long = "continue", conflicts_with = "branch", help = "Commit the resolved conflicts")]
        continue_merge: bool,
    },
}

#[derive(Subcommand)]
enum BranchAction {
    #[command(name = "remove", about = "Remove a branch and the history only it reaches")]
    Remove {
        #[arg(index = 1)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match error.downcast_ref::<RepositoryError>() {
            Some(error) if error.is_benign() => {
                println!("{error}");
                ExitCode::SUCCESS
            }
            _ => {
                colored::control::set_override(std::io::stderr().is_terminal());
                eprintln!("{}", format!("error: {error:#}").red());
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let work_tree = match cli.work_tree {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let root = match &cli.command {
        Commands::Init { path: Some(path) } => work_tree.join(path),
        _ => work_tree,
    };
    let mut repository = Repository::new(&root, Box::new(std::io::stdout()))?;

    match cli.command {
        Commands::Init { .. } => repository.init().await?,
        Commands::Add { paths } => {
            repository.add(&paths).await?;
        }
        Commands::Rm { paths } => {
            repository.rm(&paths).await?;
        }
        Commands::Commit { message, paths } => {
            repository.commit(&message, &paths).await?;
        }
        Commands::Status => {
            repository.status().await?;
        }
        Commands::Log { from } => {
            repository.log(from.as_deref()).await?;
        }
        Commands::Checkout { revision, paths } => match revision {
            Some(revision) => {
                repository.checkout(&revision).await?;
            }
            None => {
                repository.checkout_files(&paths).await?;
            }
        },
        Commands::Reset { revision } => {
            repository.reset(&revision).await?;
        }
        Commands::Branch { action, name } => match (action, name) {
            (Some(BranchAction::Remove { name }), _) => repository.branch_remove(&name)?,
            (None, Some(name)) => {
                repository.branch_create(&name)?;
            }
            (None, None) => {
                repository.branch_list()?;
            }
        },
        Commands::Merge {
            branch,
            continue_merge,
        } => {
            if continue_merge {
                repository.merge_continue().await?;
            } else if let Some(branch) = branch {
                repository.merge(&branch).await?;
            }
        }
    }

    Ok(())
}
