//! Integration tests for AddressBook operations using mockito for HTTP mocking.

use mailroster::models::address_book::AddressBookRecord;
use mailroster::models::contact::ContactRecord;
use mailroster::{Account, AddressBook, ApiClient, Contact};
use mockito::{Matcher, Server};
use serde_json::json;

fn account(server: &Server) -> Account {
    let client = ApiClient::with_base_url(server.url(), "test-api-key".to_string());
    Account::with_data_fields(client, Vec::new())
}

#[test]
fn test_find_by_id() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/address-books/123")
        .match_header("x-api-key", "test-api-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 123,
                "name": "Main list",
                "visibility": "Private",
                "contacts": 42
            })
            .to_string(),
        )
        .create();

    let account = account(&server);
    let book = AddressBook::find_by_id(&account, 123)
        .unwrap()
        .expect("address book should be present");

    mock.assert();
    assert_eq!(book.id(), Some(123));
    assert_eq!(book.name(), "Main list");
    assert_eq!(book.visibility(), Some("Private"));
    assert_eq!(book.contact_count(), 42);
}

#[test]
fn test_find_by_id_not_found_returns_none() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/address-books/999")
        .with_status(404)
        .with_body("Address book not found")
        .create();

    let account = account(&server);
    let result = AddressBook::find_by_id(&account, 999).unwrap();

    mock.assert();
    assert!(result.is_none());
}

#[test]
fn test_save_sends_full_record() {
    let mut server = Server::new();

    let mock = server
        .mock("PUT", "/address-books/123")
        .match_header("x-api-key", "test-api-key")
        .match_body(Matcher::Json(json!({
            "id": 123,
            "name": "Renamed list",
            "visibility": "Private",
            "contacts": 42
        })))
        .with_status(200)
        .with_body("{}")
        .create();

    let account = account(&server);
    let record = AddressBookRecord {
        id: Some(123),
        name: "Main list".to_string(),
        visibility: Some("Private".to_string()),
        contact_count: 42,
    };
    let mut book = AddressBook::from_record(account, record);
    book.set_name("Renamed list");
    book.save().unwrap();

    mock.assert();
}

#[test]
fn test_delete() {
    let mut server = Server::new();

    let mock = server
        .mock("DELETE", "/address-books/123")
        .match_header("x-api-key", "test-api-key")
        .with_status(204)
        .create();

    let account = account(&server);
    let record = AddressBookRecord {
        id: Some(123),
        name: "Main list".to_string(),
        visibility: None,
        contact_count: 0,
    };
    AddressBook::from_record(account, record).delete().unwrap();

    mock.assert();
}

#[test]
fn test_add_contact_posts_email_only() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/address-books/123/contacts")
        .match_header("x-api-key", "test-api-key")
        .match_body(Matcher::Json(json!({ "email": "foo@example.com" })))
        .with_status(200)
        .with_body("{}")
        .create();

    let account = account(&server);
    let record = AddressBookRecord {
        id: Some(123),
        name: "Main list".to_string(),
        visibility: None,
        contact_count: 0,
    };
    let book = AddressBook::from_record(account.clone(), record);

    let contact_record = ContactRecord {
        id: Some(456),
        email: "foo@example.com".to_string(),
        ..Default::default()
    };
    let contact = Contact::from_record(account, contact_record);

    book.add_contact(&contact).unwrap();

    mock.assert();
}
