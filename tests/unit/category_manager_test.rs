use passkeep::managers::category_manager::{CategoryManager, CategoryManagerTrait};
use passkeep::types::category::{Category, Identifier};
use passkeep::types::errors::StoreError;
use passkeep::types::password::PasswordEntry;

fn with_passwords(secrets: &[&str]) -> (CategoryManager, u64) {
    let mut mgr = CategoryManager::new();
    let id = mgr.add("Email");
    for secret in secrets {
        mgr.add_password(id, secret).unwrap();
    }
    (mgr, id)
}

fn secrets(mgr: &CategoryManager, id: u64) -> Vec<String> {
    mgr.get_by_id(id)
        .unwrap()
        .passwords
        .iter()
        .map(|p| p.secret.clone())
        .collect()
}

// ─── Categories ───

#[test]
fn test_add_assigns_sequential_ids_from_one() {
    let mut mgr = CategoryManager::new();
    assert_eq!(mgr.add("Email"), 1);
    assert_eq!(mgr.add("Work"), 2);
    assert_eq!(mgr.len(), 2);
}

#[test]
fn test_ids_not_reused_after_remove() {
    let mut mgr = CategoryManager::new();
    mgr.add("Email");
    let work = mgr.add("Work");
    mgr.remove(&Identifier::Id(work)).unwrap();
    assert_eq!(mgr.add("Games"), 3);
}

#[test]
fn test_list_preserves_insertion_order() {
    let mut mgr = CategoryManager::new();
    mgr.add("Zeta");
    mgr.add("Alpha");
    let names: Vec<&str> = mgr.list().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);
}

#[test]
fn test_has_any() {
    let mut mgr = CategoryManager::new();
    assert!(!mgr.has_any());
    mgr.add("Email");
    assert!(mgr.has_any());
}

#[test]
fn test_resolve_by_id_and_name() {
    let mut mgr = CategoryManager::new();
    mgr.add("Email");
    let work = mgr.add("Work");

    assert_eq!(mgr.resolve(&Identifier::Id(work)).unwrap().name, "Work");
    assert_eq!(mgr.resolve(&Identifier::from("Email")).unwrap().id, 1);
    assert!(mgr.resolve(&Identifier::Id(99)).is_none());
    assert!(mgr.resolve(&Identifier::from("missing")).is_none());
}

#[test]
fn test_name_lookup_is_case_sensitive() {
    let mut mgr = CategoryManager::new();
    mgr.add("Email");
    assert!(mgr.get_by_name("email").is_none());
    assert!(mgr.get_by_name("Email").is_some());
}

#[test]
fn test_duplicate_names_first_match_wins() {
    let mut mgr = CategoryManager::new();
    let first = mgr.add("Shared");
    mgr.add("Shared");
    assert_eq!(mgr.get_by_name("Shared").unwrap().id, first);
}

#[test]
fn test_identifier_parse() {
    assert_eq!(Identifier::parse("12"), Identifier::Id(12));
    assert_eq!(Identifier::parse(" 7 "), Identifier::Id(7));
    assert_eq!(Identifier::parse("Work"), Identifier::Name("Work".to_string()));
    assert_eq!(Identifier::parse("-1"), Identifier::Name("-1".to_string()));
    assert_eq!(Identifier::parse("3 Kings"), Identifier::Name("3 Kings".to_string()));
}

#[test]
fn test_remove_by_name_returns_category() {
    let mut mgr = CategoryManager::new();
    mgr.add("Email");
    let removed = mgr.remove(&Identifier::from("Email")).unwrap();
    assert_eq!(removed.name, "Email");
    assert!(!mgr.has_any());
}

#[test]
fn test_remove_missing_is_not_found() {
    let mut mgr = CategoryManager::new();
    mgr.add("Email");
    assert!(matches!(
        mgr.remove(&Identifier::from("Work")),
        Err(StoreError::NotFound(_))
    ));
    assert_eq!(mgr.len(), 1);
}

#[test]
fn test_sort_categories_reassigns_ids() {
    let mut mgr = CategoryManager::new();
    mgr.add("Work");
    mgr.add("Email");
    mgr.sort_categories_by_name();

    let list = mgr.list();
    assert_eq!(list[0].name, "Email");
    assert_eq!(list[0].id, 1);
    assert_eq!(list[1].name, "Work");
    assert_eq!(list[1].id, 2);
}

#[test]
fn test_sort_categories_already_ordered() {
    let mut mgr = CategoryManager::new();
    mgr.add("Email");
    mgr.add("Work");
    mgr.sort_categories_by_name();
    let ids: Vec<(u64, &str)> = mgr.list().iter().map(|c| (c.id, c.name.as_str())).collect();
    assert_eq!(ids, vec![(1, "Email"), (2, "Work")]);
}

#[test]
fn test_add_after_sort_does_not_collide() {
    let mut mgr = CategoryManager::new();
    mgr.add("b");
    mgr.add("c");
    let a = mgr.add("a");
    mgr.remove(&Identifier::Id(a)).unwrap();
    mgr.sort_categories_by_name();
    let next = mgr.add("d");
    assert!(mgr.list().iter().filter(|c| c.id == next).count() == 1);
}

// ─── Passwords within a category ───

#[test]
fn test_add_password_ids_follow_position() {
    let mut mgr = CategoryManager::new();
    let id = mgr.add("Email");
    assert_eq!(mgr.add_password(id, "one").unwrap(), 1);
    assert_eq!(mgr.add_password(id, "two").unwrap(), 2);
}

#[test]
fn test_add_password_missing_category() {
    let mut mgr = CategoryManager::new();
    assert!(matches!(
        mgr.add_password(4, "secret"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn test_remove_password_shifts_down() {
    let (mut mgr, id) = with_passwords(&["first", "second", "third"]);
    let removed = mgr.remove_password(id, 2).unwrap();
    assert_eq!(removed.secret, "second");

    let category = mgr.get_by_id(id).unwrap();
    assert_eq!(category.password_at(2).unwrap().secret, "third");
    assert_eq!(category.password_at(2).unwrap().id, 2);
    assert_eq!(category.passwords.len(), 2);
}

#[test]
fn test_remove_password_out_of_range_leaves_sequence() {
    let (mut mgr, id) = with_passwords(&["first", "second", "third"]);
    assert_eq!(
        mgr.remove_password(id, 4),
        Err(StoreError::OutOfRange { position: 4, len: 3 })
    );
    assert_eq!(
        mgr.remove_password(id, 0),
        Err(StoreError::OutOfRange { position: 0, len: 3 })
    );
    assert_eq!(secrets(&mgr, id), vec!["first", "second", "third"]);
}

#[test]
fn test_edit_password() {
    let (mut mgr, id) = with_passwords(&["old", "keep"]);
    mgr.edit_password(id, 1, "new").unwrap();
    assert_eq!(secrets(&mgr, id), vec!["new", "keep"]);
    assert!(matches!(
        mgr.edit_password(id, 3, "x"),
        Err(StoreError::OutOfRange { .. })
    ));
    assert!(matches!(
        mgr.edit_password(42, 1, "x"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn test_sort_passwords_within_renumbers() {
    let (mut mgr, id) = with_passwords(&["pear", "apple", "fig"]);
    mgr.sort_passwords_within(id).unwrap();

    let category = mgr.get_by_id(id).unwrap();
    let entries: Vec<(u64, &str)> = category
        .passwords
        .iter()
        .map(|p| (p.id, p.secret.as_str()))
        .collect();
    assert_eq!(entries, vec![(1, "apple"), (2, "fig"), (3, "pear")]);
}

#[test]
fn test_sort_all_orders_categories_and_passwords() {
    let mut mgr = CategoryManager::new();
    let work = mgr.add("Work");
    mgr.add_password(work, "zz").unwrap();
    mgr.add_password(work, "aa").unwrap();
    mgr.add("Email");

    mgr.sort_all();
    let work = mgr.get_by_name("Work").unwrap();
    assert_eq!(work.id, 2);
    assert_eq!(work.passwords[0].secret, "aa");
}

// ─── Search and restore ───

#[test]
fn test_search_literal_case_sensitive() {
    let mut mgr = CategoryManager::new();
    let email = mgr.add("Email");
    mgr.add_password(email, "snapApple").unwrap();
    mgr.add_password(email, "apple-pie").unwrap();
    let work = mgr.add("Work");
    mgr.add_password(work, "App.*").unwrap();

    let hits = mgr.search("App");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].category_name, "Email");
    assert_eq!(hits[0].password_id, 1);
    assert_eq!(hits[1].category_name, "Work");

    assert_eq!(mgr.search(".*").len(), 1);
    assert!(mgr.search("missing").is_empty());
}

#[test]
fn test_restore_replaces_contents_and_advances_counter() {
    let mut mgr = CategoryManager::new();
    mgr.add("Scratch");

    let mut imported = Category::new(5, "Banking");
    imported.passwords.push(PasswordEntry::new(9, "one"));
    imported.passwords.push(PasswordEntry::new(9, "two"));
    mgr.restore(vec![imported]);

    assert_eq!(mgr.len(), 1);
    let banking = mgr.get_by_id(5).unwrap();
    assert_eq!(banking.passwords[1].id, 2);
    assert_eq!(mgr.add("Next"), 6);
}

#[test]
fn test_restore_gives_repeated_ids_fresh_ones() {
    let mut mgr = CategoryManager::new();
    let changes = mgr.restore(vec![
        Category::new(1, "A"),
        Category::new(3, "B"),
        Category::new(1, "C"),
    ]);

    assert_eq!(changes, vec![(1, 4)]);
    let ids: Vec<u64> = mgr.list().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);
    assert_eq!(mgr.get_by_id(1).unwrap().name, "A");
    assert_eq!(mgr.get_by_id(4).unwrap().name, "C");
    assert_eq!(mgr.add("Next"), 5);
}

#[test]
fn test_restore_near_id_limit_compacts_instead_of_overflowing() {
    let mut mgr = CategoryManager::new();
    let changes = mgr.restore(vec![
        Category::new(u64::MAX, "A"),
        Category::new(u64::MAX, "B"),
    ]);

    assert_eq!(changes, vec![(u64::MAX, 1), (u64::MAX, 2)]);
    assert_eq!(mgr.add("C"), 3);
}

#[test]
fn test_add_after_restoring_largest_id_compacts() {
    let mut mgr = CategoryManager::new();
    assert!(mgr.restore(vec![Category::new(7, "A"), Category::new(u64::MAX - 1, "B")]).is_empty());

    assert_eq!(mgr.add("C"), 3);
    let ids: Vec<u64> = mgr.list().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
