// Filter Engine for gitsheet
//
// Maps the dataset and a query to the visible subset of the cheatsheet.
// Matching is plain case-insensitive substring containment against the command
// text, the description and the owning category's name. Nothing is ranked or
// re-sorted: the view keeps the dataset's category and command order.

use tracing::debug;

use crate::dataset::{Category, Command};

/// A category as it appears in a filtered view, borrowing from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredCategory<'a> {
    pub category: &'a Category,
    pub commands: Vec<&'a Command>,
}

impl<'a> FilteredCategory<'a> {
    pub fn name(&self) -> &'a str {
        &self.category.name
    }

    /// Materializes the view into an owned category holding only the visible
    /// commands.
    pub fn to_category(&self) -> Category {
        Category {
            name: self.category.name.clone(),
            accent: self.category.accent,
            commands: self.commands.iter().map(|c| (*c).clone()).collect(),
        }
    }
}

/// Filters `dataset` by `query`.
///
/// The query is trimmed and lowercased before matching. An empty query yields
/// every category with every command. Otherwise a command is kept when its
/// text, its description or its category's name contains the query, and a
/// category is kept when at least one of its commands is.
pub fn filter<'a>(dataset: &'a [Category], query: &str) -> Vec<FilteredCategory<'a>> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return dataset
            .iter()
            .map(|category| FilteredCategory {
                category,
                commands: category.commands.iter().collect(),
            })
            .collect();
    }

    let view: Vec<FilteredCategory<'a>> = dataset
        .iter()
        .filter_map(|category| {
            // A category-name hit makes every command in it pass.
            let name_hit = category.name.to_lowercase().contains(&q);
            let commands: Vec<&Command> = category
                .commands
                .iter()
                .filter(|c| {
                    name_hit
                        || c.cmd.to_lowercase().contains(&q)
                        || c.desc.to_lowercase().contains(&q)
                })
                .collect();
            if commands.is_empty() {
                None
            } else {
                Some(FilteredCategory { category, commands })
            }
        })
        .collect();

    debug!(query = %q, categories = view.len(), "filtered cheatsheet");
    view
}

/// Total number of commands visible in a view.
pub fn match_count(view: &[FilteredCategory<'_>]) -> usize {
    view.iter().map(|c| c.commands.len()).sum()
}
