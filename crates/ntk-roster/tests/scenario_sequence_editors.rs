use ntk_roster::{EditError, RosterConfig, SnapshotList};
use ntk_testkit::*;

fn roster(entries: Vec<ntk_roster::Listing>) -> SnapshotList {
    SnapshotList::new_at(entries, RosterConfig::new(10, 300), fixed_now())
}

#[test]
fn drop_to_end() {
    let ten = ten_listings_no_empty();
    let mut list = roster(ten.clone());
    list.drop_range(8, None, 1).unwrap();
    assert_same_roster(list.entries(), &ten[..8]);
}

#[test]
fn drop_bounded_range() {
    let mut list = roster(ten_listings_no_empty());
    list.drop_range(2, Some(5), 1).unwrap();
    assert_eq!(
        render(list.entries()),
        vec!["1", "2", "6", "7", "8", "9", "10"]
    );
}

#[test]
fn insert_restores_removed_row() {
    let mut list = roster(nine_listings_removed_6());
    list.insert(vec![listing("7")], 6).unwrap();
    assert_same_roster(list.entries(), &ten_listings_no_empty());
}

#[test]
fn insert_past_end_fails_fast() {
    let mut list = roster(nine_listings_removed_6());
    let err = list.insert(vec![listing("7")], 10).unwrap_err();
    assert_eq!(err, EditError::IndexOutOfRange { index: 10, len: 9 });
    assert_eq!(list.len(), 9, "failed insert leaves roster untouched");
}

#[test]
fn extend_appends_or_prepends() {
    let mut list = roster(vec![listing("b")]);
    list.extend(vec![listing("c")], true);
    list.extend(vec![listing("a")], false);
    assert_eq!(render(list.entries()), vec!["a", "b", "c"]);
}

#[test]
fn drop_by_indices_filters_in_order() {
    let mut list = roster(ten_listings_no_empty());
    list.drop_by_indices(&[9, 0, 4]).unwrap();
    assert_eq!(
        render(list.entries()),
        vec!["2", "3", "4", "6", "7", "8", "9"]
    );
}

#[test]
fn drop_by_indices_rejects_out_of_range() {
    let mut list = roster(ten_listings_no_empty());
    let err = list.drop_by_indices(&[1, 10]).unwrap_err();
    assert_eq!(err, EditError::IndexOutOfRange { index: 10, len: 10 });
    assert_eq!(list.len(), 10);
}

#[test]
fn same_length_replace_writes_in_place() {
    let mut list = roster(ten_listings_no_empty());
    list.replace(vec![listing("a"), listing("b")], 2, Some(4), 1)
        .unwrap();
    assert_eq!(
        render(list.entries()),
        vec!["1", "2", "a", "b", "5", "6", "7", "8", "9", "10"]
    );
}

#[test]
fn length_changing_replace_drops_then_inserts() {
    let mut list = roster(ten_listings_no_empty());
    list.replace(vec![listing("x")], 2, Some(5), 1).unwrap();
    assert_eq!(
        render(list.entries()),
        vec!["1", "2", "x", "6", "7", "8", "9", "10"]
    );
}

#[test]
fn replace_to_end_with_longer_run() {
    let mut list = roster(ten_listings_no_empty()[..3].to_vec());
    list.replace(vec![listing("x"), listing("y"), listing("z")], 2, None, 1)
        .unwrap();
    assert_eq!(render(list.entries()), vec!["1", "2", "x", "y", "z"]);
}

#[test]
fn replace_out_of_bounds_fails_fast() {
    let mut list = roster(ten_listings_no_empty()[..3].to_vec());
    let err = list
        .replace(vec![listing("x")], 1, Some(7), 1)
        .unwrap_err();
    assert_eq!(
        err,
        EditError::RangeOutOfBounds {
            start: 1,
            stop: 7,
            len: 3
        }
    );
    assert_eq!(render(list.entries()), vec!["1", "2", "3"]);
}
