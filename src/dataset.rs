/// Dataset Module
///
/// The fixed cheatsheet content: categories of git commands, each with an
/// accent color and an ordered list of commands. The dataset is built once,
/// on first access, and is shared read-only for the rest of the process.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{Result, SheetError};

/// Matches any run of whitespace. Shared by anchor derivation and query
/// normalization.
pub(crate) static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Cosmetic color tag for a category. Has no effect on filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accent {
    Emerald,
    Cyan,
    Violet,
    Amber,
    Sky,
    Rose,
    Fuchsia,
    #[default]
    Default,
}

/// One documented git operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub cmd: String,
    pub desc: String,
    pub example: Option<String>,
}

impl Command {
    pub fn new(cmd: &str, desc: &str) -> Self {
        Command {
            cmd: cmd.to_string(),
            desc: desc.to_string(),
            example: None,
        }
    }

    /// Attaches a shell transcript shown under the command.
    pub fn with_example(mut self, example: &str) -> Self {
        self.example = Some(example.to_string());
        self
    }
}

/// A named, ordered group of commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub accent: Accent,
    pub commands: Vec<Command>,
}

impl Category {
    pub fn new(name: &str, accent: Accent, commands: Vec<Command>) -> Self {
        Category {
            name: name.to_string(),
            accent,
            commands,
        }
    }

    /// Stable jump target for this category. See [`anchor_id`].
    pub fn anchor(&self) -> String {
        anchor_id(&self.name)
    }
}

/// Derives the navigation anchor for a category name: every whitespace run
/// becomes a hyphen and the result is lowercased.
pub fn anchor_id(name: &str) -> String {
    WHITESPACE.replace_all(name, "-").to_lowercase()
}

static CATEGORIES: Lazy<Vec<Category>> = Lazy::new(build_categories);

/// Returns the built-in cheatsheet.
pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

/// Checks the invariants the rest of the application relies on: non-empty
/// text, unique category names, unique command text within a category.
pub fn validate(dataset: &[Category]) -> Result<()> {
    let mut names = HashSet::new();
    for category in dataset {
        if category.name.trim().is_empty() {
            return Err(SheetError::Dataset("category with empty name".to_string()));
        }
        if !names.insert(category.name.as_str()) {
            return Err(SheetError::Dataset(format!(
                "duplicate category name '{}'",
                category.name
            )));
        }

        let mut commands = HashSet::new();
        for command in &category.commands {
            if command.cmd.trim().is_empty() || command.desc.trim().is_empty() {
                return Err(SheetError::Dataset(format!(
                    "empty command or description in category '{}'",
                    category.name
                )));
            }
            if !commands.insert(command.cmd.as_str()) {
                return Err(SheetError::Dataset(format!(
                    "duplicate command '{}' in category '{}'",
                    command.cmd, category.name
                )));
            }
        }
    }
    Ok(())
}

fn build_categories() -> Vec<Category> {
    vec![
        Category::new(
            "Basics",
            Accent::Emerald,
            vec![
                Command::new("git init", "Initialize a new Git repository in current folder"),
                Command::new("git status", "Show changed files in the working directory"),
                Command::new("git add .", "Stage all changes for the next commit"),
                Command::new("git add <file>", "Stage a specific file"),
                Command::new("git restore --staged <file>", "Unstage a file (keep changes)"),
                Command::new("git commit -m \"message\"", "Commit staged changes with a message"),
                Command::new(
                    "git log --oneline --graph --decorate",
                    "Compact commit history with graph",
                ),
                Command::new("git diff", "Show unstaged changes"),
                Command::new("git diff --staged", "Show staged changes"),
            ],
        ),
        Category::new(
            "Branching",
            Accent::Cyan,
            vec![
                Command::new("git branch", "List branches"),
                Command::new("git branch <name>", "Create a new branch"),
                Command::new("git switch <name>", "Switch to branch (or git checkout <name>)"),
                Command::new("git switch -c <name>", "Create and switch to new branch"),
                Command::new("git merge <branch>", "Merge a branch into current branch"),
                Command::new("git rebase <branch>", "Reapply commits on top of another base tip"),
                Command::new(
                    "git cherry-pick <sha>",
                    "Apply the changes introduced by some existing commit",
                ),
                Command::new("git branch -d <name>", "Delete a branch (safe)"),
                Command::new("git branch -D <name>", "Delete a branch (force)"),
            ],
        ),
        Category::new(
            "Remote",
            Accent::Violet,
            vec![
                Command::new("git remote -v", "List remote repositories"),
                Command::new("git remote add origin <url>", "Add a remote named origin"),
                Command::new(
                    "git push -u origin <branch>",
                    "Push and set upstream for current branch",
                ),
                Command::new("git push", "Push current branch to its upstream"),
                Command::new("git fetch", "Download objects and refs from remotes"),
                Command::new("git pull --rebase", "Fetch and rebase current branch on upstream"),
                Command::new("git clone <url>", "Clone a repository"),
            ],
        ),
        Category::new(
            "Stash",
            Accent::Amber,
            vec![
                Command::new("git stash", "Stash tracked changes"),
                Command::new("git stash -u", "Stash including untracked files"),
                Command::new("git stash list", "List all stashes"),
                Command::new("git stash apply [stash]", "Apply stash (keep in stash)"),
                Command::new("git stash pop", "Apply and drop latest stash"),
                Command::new("git stash drop [stash]", "Drop a specific stash"),
            ],
        ),
        Category::new(
            "History & Inspect",
            Accent::Sky,
            vec![
                Command::new("git show <sha>", "Show details for a specific commit"),
                Command::new("git blame <file>", "Show who changed what and when in a file"),
                Command::new("git tag", "List tags"),
                Command::new("git tag <name>", "Create a lightweight tag"),
                Command::new("git tag -a <name> -m \"msg\"", "Create an annotated tag"),
                Command::new("git describe --tags", "Describe current commit using closest tag"),
            ],
        ),
        Category::new(
            "Undo & Fix",
            Accent::Rose,
            vec![
                Command::new("git restore <file>", "Discard changes in the working directory"),
                Command::new("git reset <file>", "Unstage while keeping changes"),
                Command::new("git reset --hard", "Reset working tree and index to last commit"),
                Command::new("git revert <sha>", "Create a new commit reverting a specific commit"),
                Command::new("git commit --amend", "Amend last commit (message or staged changes)"),
                Command::new("git reflog", "Reference log of updates to HEAD (life saver)"),
            ],
        ),
        Category::new(
            "Advanced",
            Accent::Fuchsia,
            vec![
                Command::new("git rebase -i <base>", "Interactive rebase (reorder/squash/edit)"),
                Command::new(
                    "git worktree add ../folder <branch>",
                    "Checkout another branch in a separate folder",
                ),
                Command::new("git submodule add <url>", "Add a submodule"),
                Command::new("git clean -fd", "Remove untracked files and directories"),
                Command::new(
                    "git bisect start",
                    "Binary search for the commit that introduced a bug",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_dataset_is_valid() {
        assert!(validate(categories()).is_ok());
    }

    #[test]
    fn test_builtin_dataset_shape() {
        let counts: Vec<(&str, usize)> = categories()
            .iter()
            .map(|c| (c.name.as_str(), c.commands.len()))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Basics", 9),
                ("Branching", 9),
                ("Remote", 7),
                ("Stash", 6),
                ("History & Inspect", 6),
                ("Undo & Fix", 6),
                ("Advanced", 5),
            ]
        );
    }

    #[test]
    fn test_anchor_id() {
        assert_eq!(anchor_id("Basics"), "basics");
        assert_eq!(anchor_id("History & Inspect"), "history-&-inspect");
        assert_eq!(anchor_id("Undo  &\tFix"), "undo-&-fix");
        assert_eq!(categories()[5].anchor(), "undo-&-fix");
    }

    #[test]
    fn test_validate_rejects_duplicate_category() {
        let dataset = vec![
            Category::new("Basics", Accent::Default, vec![Command::new("git init", "Init")]),
            Category::new("Basics", Accent::Cyan, vec![Command::new("git add", "Add")]),
        ];
        let err = validate(&dataset).unwrap_err();
        assert!(err.to_string().contains("duplicate category name 'Basics'"));
    }

    #[test]
    fn test_validate_rejects_duplicate_command() {
        let dataset = vec![Category::new(
            "Basics",
            Accent::Default,
            vec![Command::new("git init", "Init"), Command::new("git init", "Again")],
        )];
        let err = validate(&dataset).unwrap_err();
        assert!(matches!(err, SheetError::Dataset(_)));
        assert!(err.to_string().contains("duplicate command 'git init'"));
    }

    #[test]
    fn test_validate_rejects_empty_description() {
        let dataset = vec![Category::new(
            "Basics",
            Accent::Default,
            vec![Command::new("git init", "  ")],
        )];
        assert!(validate(&dataset).is_err());
    }

    #[test]
    fn test_with_example() {
        let command = Command::new("git log", "History").with_example("git log -3");
        assert_eq!(command.example.as_deref(), Some("git log -3"));
        assert_eq!(Accent::default(), Accent::Default);
    }
}
