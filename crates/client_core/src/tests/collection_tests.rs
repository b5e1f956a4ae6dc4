use super::*;

fn file(name: &str) -> FileRef {
    FileRef::new(name, name.as_bytes().to_vec(), "application/pdf")
}

fn has_unique_names(collection: &FileCollection) -> bool {
    let names = collection.names();
    let unique: HashSet<&String> = names.iter().collect();
    unique.len() == names.len()
}

#[test]
fn add_appends_in_given_order() {
    let collection = FileCollection::new().add(vec![file("b.pdf"), file("a.pdf")]);
    let collection = collection.add(vec![file("c.png")]);
    assert_eq!(collection.names(), vec!["b.pdf", "a.pdf", "c.png"]);
}

#[test]
fn add_skips_names_already_present() {
    let original = FileCollection::new().add(vec![file("a.pdf")]);
    let replacement = FileRef::new("a.pdf", b"other bytes".to_vec(), "application/pdf");
    let collection = original.add(vec![replacement, file("b.pdf")]);

    assert_eq!(collection.names(), vec!["a.pdf", "b.pdf"]);
    assert_eq!(collection.get(0), original.get(0));
}

#[test]
fn add_collapses_duplicates_within_one_batch() {
    let collection = FileCollection::new().add(vec![file("a.pdf"), file("a.pdf"), file("b.pdf")]);
    assert_eq!(collection.names(), vec!["a.pdf", "b.pdf"]);
}

#[test]
fn add_with_nothing_new_is_a_no_op() {
    let collection = FileCollection::new().add(vec![file("a.pdf")]);
    assert_eq!(collection.add(Vec::new()), collection);
    assert_eq!(collection.add(vec![file("a.pdf")]), collection);
}

#[test]
fn remove_preserves_relative_order() {
    let collection = FileCollection::new().add(vec![file("a.pdf"), file("b.pdf"), file("c.pdf")]);
    let removed = collection.remove(1).expect("valid index");
    assert_eq!(removed.names(), vec!["a.pdf", "c.pdf"]);
    assert_eq!(collection.len(), 3, "source collection is left untouched");
}

#[test]
fn remove_out_of_range_fails_without_changes() {
    let collection = FileCollection::new().add(vec![file("a.pdf"), file("b.pdf")]);
    let err = collection.remove(2).expect_err("index past the end");
    assert_eq!(err, ContractError::IndexOutOfRange { index: 2, len: 2 });
    assert_eq!(collection.names(), vec!["a.pdf", "b.pdf"]);

    assert!(matches!(
        FileCollection::new().remove(0),
        Err(ContractError::IndexOutOfRange { index: 0, len: 0 })
    ));
}

#[test]
fn removed_name_can_be_added_again() {
    let collection = FileCollection::new()
        .add(vec![file("a.pdf")])
        .remove(0)
        .expect("remove")
        .add(vec![file("a.pdf")]);
    assert_eq!(collection.names(), vec!["a.pdf"]);
}

#[test]
fn names_stay_unique_across_mixed_intents() {
    let pool = ["a.pdf", "b.pdf", "c.png", "d.jpg", "e.jpeg"];
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    let mut collection = FileCollection::new();
    for _ in 0..500 {
        if next() % 3 == 0 {
            let index = next() % (collection.len() + 1);
            let before = collection.clone();
            match collection.remove(index) {
                Ok(updated) => {
                    assert_eq!(updated.len(), before.len() - 1);
                    collection = updated;
                }
                Err(_) => assert_eq!(collection, before),
            }
        } else {
            let batch: Vec<FileRef> = (0..next() % 4)
                .map(|_| file(pool[next() % pool.len()]))
                .collect();
            collection = collection.add(batch);
        }
        assert!(has_unique_names(&collection));
    }
}

#[test]
fn total_bytes_sums_payloads() {
    let collection = FileCollection::new().add(vec![file("ab.pdf"), file("c.pdf")]);
    assert_eq!(collection.total_bytes(), "ab.pdf".len() + "c.pdf".len());
}
