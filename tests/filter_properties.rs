//! Property-based tests for the filter engine
//!
//! These tests check the invariants of `filter` against both the built-in
//! cheatsheet and randomly generated datasets:
//! - Empty and whitespace-only queries return everything
//! - Every visible command matches, and every matching command is visible
//! - Filtering an already filtered view by the same query changes nothing
//! - Category and command order follow the dataset
//! - Matching ignores case

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use gitsheet::dataset::{categories, Accent, Category, Command};
    use gitsheet::filter::{filter, FilteredCategory};

    fn matches(category: &Category, command: &Command, q: &str) -> bool {
        command.cmd.to_lowercase().contains(q)
            || command.desc.to_lowercase().contains(q)
            || category.name.to_lowercase().contains(q)
    }

    fn owned(view: &[FilteredCategory<'_>]) -> Vec<Category> {
        view.iter().map(|c| c.to_category()).collect()
    }

    /// Words and fragments that actually occur in the built-in cheatsheet,
    /// so generated queries hit something reasonably often.
    fn vocabulary() -> Vec<String> {
        let mut words = Vec::new();
        for category in categories() {
            words.push(category.name.clone());
            for command in &category.commands {
                words.extend(command.cmd.split_whitespace().map(String::from));
                words.extend(command.desc.split_whitespace().map(String::from));
            }
        }
        words
    }

    fn arb_query() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z .<>&-]{0,8}".prop_map(|s: String| s),
            prop::sample::select(vocabulary()),
            (prop::sample::select(vocabulary()), any::<bool>())
                .prop_map(|(word, upper)| if upper { word.to_uppercase() } else { word }),
        ]
    }

    fn arb_command() -> impl Strategy<Value = Command> {
        ("[a-z <>-]{1,12}", "[A-Za-z ]{1,16}")
            .prop_map(|(cmd, desc)| Command::new(&cmd, &desc))
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        ("[A-Za-z ]{1,10}", prop::collection::vec(arb_command(), 0..6))
            .prop_map(|(name, commands)| Category::new(&name, Accent::Default, commands))
    }

    fn arb_dataset() -> impl Strategy<Value = Vec<Category>> {
        prop::collection::vec(arb_category(), 0..6)
    }

    fn check_invariants(dataset: &[Category], query: &str) -> Result<(), TestCaseError> {
        let q = query.trim().to_lowercase();
        let view = filter(dataset, query);

        if q.is_empty() {
            prop_assert_eq!(owned(&view), dataset.to_vec());
            return Ok(());
        }

        // Soundness: everything shown matches.
        for category in &view {
            prop_assert!(!category.commands.is_empty());
            for command in &category.commands {
                prop_assert!(matches(category.category, command, &q));
            }
        }

        // Completeness: everything that matches is shown.
        for category in dataset {
            for command in &category.commands {
                if matches(category, command, &q) {
                    let shown = view.iter().any(|c| {
                        std::ptr::eq(c.category, category)
                            && c.commands.iter().any(|s| std::ptr::eq(*s, command))
                    });
                    prop_assert!(shown, "{:?} should match {:?}", command.cmd, q);
                }
            }
        }

        // Order: positions in the dataset strictly increase.
        let positions: Vec<usize> = view
            .iter()
            .map(|c| dataset.iter().position(|d| std::ptr::eq(d, c.category)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for category in &view {
            let indices: Vec<usize> = category
                .commands
                .iter()
                .map(|s| {
                    category
                        .category
                        .commands
                        .iter()
                        .position(|c| std::ptr::eq(c, *s))
                        .unwrap()
                })
                .collect();
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }

        // Idempotence: re-filtering the materialized view is a no-op.
        let once = owned(&view);
        prop_assert_eq!(owned(&filter(&once, query)), once);
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_whitespace_query_is_identity(query in "[ \t\n]{0,6}") {
            prop_assert_eq!(owned(&filter(categories(), &query)), categories().to_vec());
        }

        #[test]
        fn prop_builtin_invariants(query in arb_query()) {
            check_invariants(categories(), &query)?;
        }

        #[test]
        fn prop_generated_invariants(dataset in arb_dataset(), query in "[a-zA-Z <-]{0,4}") {
            check_invariants(&dataset, &query)?;
        }

        #[test]
        fn prop_case_insensitive(query in "[a-zA-Z ]{0,10}") {
            let upper = filter(categories(), &query.to_uppercase());
            let lower = filter(categories(), &query.to_lowercase());
            prop_assert_eq!(owned(&upper), owned(&lower));
        }

        #[test]
        fn prop_filter_never_mutates(query in arb_query()) {
            let before = categories().to_vec();
            let _ = filter(categories(), &query);
            prop_assert_eq!(categories().to_vec(), before);
        }
    }

    #[test]
    fn test_concrete_scenarios() {
        let stash = filter(categories(), "stash");
        assert_eq!(stash.len(), 1);
        assert_eq!(stash[0].name(), "Stash");
        assert_eq!(stash[0].commands.len(), 6);

        assert!(filter(categories(), "nonexistent-xyz").is_empty());

        let query = gitsheet::search::normalize("  git   add  ");
        let add = filter(categories(), &query);
        let cmds: Vec<&str> = add
            .iter()
            .flat_map(|c| c.commands.iter().map(|s| s.cmd.as_str()))
            .collect();
        assert_eq!(cmds, vec!["git add .", "git add <file>"]);
    }
}
