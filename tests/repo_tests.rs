use cardlist::{
    models::{NewCard, NewList},
    repo::{inmem::InMemRepo, RepoError},
};
// Bring trait method namespaces into scope so calls on InMemRepo resolve.
use cardlist::repo::{CardRepo, ListRepo};

#[tokio::test]
async fn card_crud() {
    let r = InMemRepo::new();

    // starts empty
    assert!(r.list_cards().await.unwrap().is_empty());

    let a = r.create_card(NewCard::new("A", "first")).await.unwrap();
    let b = r.create_card(NewCard::new("B", "second")).await.unwrap();
    assert_ne!(a.id, b.id);

    // insertion order
    let titles: Vec<_> = r.list_cards().await.unwrap().into_iter().map(|c| c.title).collect();
    assert_eq!(titles, vec!["A", "B"]);

    assert_eq!(r.get_card(&a.id).await.unwrap(), a);

    r.delete_card(&a.id).await.unwrap();
    let err = r.get_card(&a.id).await.unwrap_err();
    assert_eq!(err, RepoError::NotFound { kind: "card", id: a.id.clone() });
    assert!(matches!(r.delete_card(&a.id).await, Err(RepoError::NotFound { .. })));
    assert_eq!(r.list_cards().await.unwrap(), vec![b]);
}

#[tokio::test]
async fn card_validation_leaves_store_untouched() {
    let r = InMemRepo::new();
    let err = r.create_card(NewCard { title: None, content: Some("x".into()) }).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref m) if m.contains("Title")));
    let err = r.create_card(NewCard { title: Some("x".into()), content: None }).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref m) if m.contains("Content")));
    assert!(r.list_cards().await.unwrap().is_empty());
}

#[tokio::test]
async fn seeded_store_matches_sample_board() {
    let r = InMemRepo::seeded();
    assert_eq!(r.list_cards().await.unwrap().len(), 3);
    let lists = r.list_lists().await.unwrap();
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].header, "List One");
    assert_eq!(lists[0].card_ids, vec!["1"]);
    assert_eq!(lists[1].card_ids, vec!["2", "3"]);
}

#[tokio::test]
async fn card_delete_cascades_into_lists() {
    let r = InMemRepo::seeded();
    let dup = r.create_list(NewList::new("Dup", vec!["3".into(), "1".into(), "3".into()])).await.unwrap();

    r.delete_card("3").await.unwrap();

    assert_eq!(r.get_list("2").await.unwrap().card_ids, vec!["2"]);
    assert_eq!(r.get_list(&dup.id).await.unwrap().card_ids, vec!["1"]);
    assert_eq!(r.get_list("1").await.unwrap().card_ids, vec!["1"]);
}

#[tokio::test]
async fn list_create_validates_references() {
    let r = InMemRepo::seeded();

    let err = r.create_list(NewList::new("Bad", vec!["1".into(), "missing".into()])).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref m) if m.contains("missing")));
    let err = r.create_list(NewList { header: Some(" ".into()), card_ids: None }).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(r.list_lists().await.unwrap().len(), 2);

    let ok = r.create_list(NewList::new("Good", vec!["2".into(), "2".into()])).await.unwrap();
    assert_eq!(ok.card_ids, vec!["2", "2"]);
    let empty = r.create_list(NewList { header: Some("Empty".into()), card_ids: None }).await.unwrap();
    assert!(empty.card_ids.is_empty());
    assert_eq!(r.list_lists().await.unwrap().len(), 4);
}

#[tokio::test]
async fn list_delete_does_not_touch_cards() {
    let r = InMemRepo::seeded();
    r.delete_list("2").await.unwrap();
    assert!(matches!(r.get_list("2").await, Err(RepoError::NotFound { kind: "list", .. })));
    assert!(matches!(r.delete_list("2").await, Err(RepoError::NotFound { .. })));
    assert_eq!(r.list_lists().await.unwrap().len(), 1);
    assert_eq!(r.list_cards().await.unwrap().len(), 3);
}

#[tokio::test]
async fn clones_share_state() {
    let r = InMemRepo::new();
    let other = r.clone();
    let card = r.create_card(NewCard::new("shared", "state")).await.unwrap();
    assert_eq!(other.get_card(&card.id).await.unwrap().title, "shared");
}
