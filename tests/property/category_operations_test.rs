//! Property-based tests for category store operations.
//!
//! Across any sequence of adds, removals, edits and sorts, category ids stay
//! unique, every category's password ids stay dense `1..=n`, and a failed
//! removal leaves the sequence as it was.

use std::collections::HashSet;

use passkeep::managers::category_manager::{CategoryManager, CategoryManagerTrait};
use passkeep::types::category::Identifier;
use passkeep::types::errors::StoreError;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddCategory(String),
    RemoveCategory(usize),
    AddPassword(usize, String),
    RemovePassword(usize, usize),
    SortCategories,
    SortPasswords(usize),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            3 => "[a-z]{1,6}".prop_map(Op::AddCategory),
            1 => (0..8usize).prop_map(Op::RemoveCategory),
            4 => (0..8usize, "[a-zA-Z0-9]{1,8}").prop_map(|(c, s)| Op::AddPassword(c, s)),
            2 => (0..8usize, 0..6usize).prop_map(|(c, p)| Op::RemovePassword(c, p)),
            1 => Just(Op::SortCategories),
            1 => (0..8usize).prop_map(Op::SortPasswords),
        ],
        1..60,
    )
}

/// Picks the id of the category at `index % len`, if there is any.
fn pick(mgr: &CategoryManager, index: usize) -> Option<u64> {
    let list = mgr.list();
    if list.is_empty() {
        None
    } else {
        Some(list[index % list.len()].id)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn store_invariants_hold(ops in arb_ops()) {
        let mut mgr = CategoryManager::new();

        for op in &ops {
            match op {
                Op::AddCategory(name) => {
                    mgr.add(name);
                }
                Op::RemoveCategory(i) => {
                    if let Some(id) = pick(&mgr, *i) {
                        mgr.remove(&Identifier::Id(id)).unwrap();
                    }
                }
                Op::AddPassword(i, secret) => {
                    if let Some(id) = pick(&mgr, *i) {
                        mgr.add_password(id, secret).unwrap();
                    }
                }
                Op::RemovePassword(i, position) => {
                    if let Some(id) = pick(&mgr, *i) {
                        let before = mgr.get_by_id(id).unwrap().passwords.clone();
                        match mgr.remove_password(id, *position) {
                            Ok(removed) => {
                                prop_assert_eq!(&removed.secret, &before[*position - 1].secret);
                            }
                            Err(StoreError::OutOfRange { .. }) => {
                                prop_assert_eq!(&mgr.get_by_id(id).unwrap().passwords, &before);
                            }
                            Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                        }
                    }
                }
                Op::SortCategories => mgr.sort_categories_by_name(),
                Op::SortPasswords(i) => {
                    if let Some(id) = pick(&mgr, *i) {
                        mgr.sort_passwords_within(id).unwrap();
                    }
                }
            }

            let ids: HashSet<u64> = mgr.list().iter().map(|c| c.id).collect();
            prop_assert_eq!(ids.len(), mgr.len(), "duplicate category id after {:?}", op);

            for category in mgr.list() {
                for (index, entry) in category.passwords.iter().enumerate() {
                    prop_assert_eq!(entry.id, (index + 1) as u64);
                }
            }
        }
    }

    #[test]
    fn sort_orders_names_and_numbers_from_one(names in proptest::collection::vec("[A-Za-z]{1,8}", 0..12)) {
        let mut mgr = CategoryManager::new();
        for name in &names {
            mgr.add(name);
        }
        mgr.sort_categories_by_name();

        let list = mgr.list();
        for (index, category) in list.iter().enumerate() {
            prop_assert_eq!(category.id, (index + 1) as u64);
        }
        prop_assert!(list.windows(2).all(|w| w[0].name <= w[1].name));
    }
}
