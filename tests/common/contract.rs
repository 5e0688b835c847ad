//! Behaviour every `EmployeeRepository` must share. Each check expects an
//! empty employees table.

use chrono::{Duration, NaiveDate, Utc};

use employee_manager_backend::db::{EmployeeRepository, RepositoryError};
use employee_manager_backend::models::employee::{Employee, EmployeeInput, EmployeeSearch};

use super::input;

fn dated(first: &str, email: &str, dob: Option<NaiveDate>) -> EmployeeInput {
    EmployeeInput {
        date_of_birth: dob,
        ..input(first, "Tester", email)
    }
}

fn first_names(items: &[Employee]) -> Vec<&str> {
    items.iter().map(|e| e.first_name.as_str()).collect()
}

async fn page(repo: &dyn EmployeeRepository, search: EmployeeSearch) -> (i64, Vec<Employee>) {
    let page = repo.search_and_paginate(&search).await.unwrap();
    (page.total_count, page.items)
}

pub async fn add_assigns_ids_and_reads_back(repo: &dyn EmployeeRepository) {
    let before = Utc::now() - Duration::seconds(1);

    let grace = repo
        .add(&dated("Grace", "grace@example.com", NaiveDate::from_ymd_opt(1906, 12, 9)))
        .await
        .unwrap();
    let alan = repo.add(&input("Alan", "Turing", "alan@example.com")).await.unwrap();

    assert!(grace.employee_id > 0);
    assert!(alan.employee_id > grace.employee_id);
    assert!(grace.created_date >= before);
    assert_eq!(grace.date_of_birth, NaiveDate::from_ymd_opt(1906, 12, 9));

    assert_eq!(repo.get_by_id(grace.employee_id).await.unwrap(), Some(grace.clone()));
    assert_eq!(repo.get_by_id(alan.employee_id + 100).await.unwrap(), None);
    assert_eq!(repo.get_all().await.unwrap(), vec![grace, alan]);
}

pub async fn unique_email_index_ignores_case(repo: &dyn EmployeeRepository) {
    repo.add(&input("Grace", "Hopper", "grace@example.com")).await.unwrap();
    let alan = repo.add(&input("Alan", "Turing", "alan@example.com")).await.unwrap();

    let err = repo
        .add(&input("Other", "Grace", "GRACE@Example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateEmail));

    let mut stolen = alan.clone();
    stolen.email = "Grace@example.COM".to_string();
    let err = repo.update(&stolen).await.unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateEmail));

    assert_eq!(repo.get_by_id(alan.employee_id).await.unwrap(), Some(alan));
    assert_eq!(repo.counts().await.unwrap().total, 2);
}

pub async fn email_exists_honours_exclusion(repo: &dyn EmployeeRepository) {
    let grace = repo.add(&input("Grace", "Hopper", "grace@example.com")).await.unwrap();
    let alan = repo.add(&input("Alan", "Turing", "alan@example.com")).await.unwrap();

    assert!(repo.email_exists("GRACE@example.com", None).await.unwrap());
    assert!(!repo.email_exists("grace@example.com", Some(grace.employee_id)).await.unwrap());
    assert!(repo.email_exists("grace@example.com", Some(alan.employee_id)).await.unwrap());
    assert!(!repo.email_exists("nobody@example.com", None).await.unwrap());
}

pub async fn update_rewrites_fields_but_not_identity(repo: &dyn EmployeeRepository) {
    let created = repo.add(&input("Grace", "Hopper", "grace@example.com")).await.unwrap();

    let mut changed = created.clone();
    changed.last_name = "Brewster Hopper".to_string();
    changed.date_of_birth = NaiveDate::from_ymd_opt(1906, 12, 9);
    changed.is_active = false;
    let updated = repo.update(&changed).await.unwrap().unwrap();

    assert_eq!(updated, changed);
    assert_eq!(updated.created_date, created.created_date);

    let mut missing = created;
    missing.employee_id += 100;
    assert_eq!(repo.update(&missing).await.unwrap(), None);
}

pub async fn soft_delete_keeps_rows_and_counts(repo: &dyn EmployeeRepository) {
    let grace = repo.add(&input("Grace", "Hopper", "grace@example.com")).await.unwrap();
    repo.add(&input("Alan", "Turing", "alan@example.com")).await.unwrap();

    repo.soft_delete(grace.employee_id).await.unwrap();
    repo.soft_delete(grace.employee_id).await.unwrap();
    repo.soft_delete(grace.employee_id + 100).await.unwrap();

    let deleted = repo.get_by_id(grace.employee_id).await.unwrap().unwrap();
    assert!(!deleted.is_active);

    let counts = repo.counts().await.unwrap();
    assert_eq!((counts.total, counts.active), (2, 1));
}

pub async fn empty_table_counts_zero(repo: &dyn EmployeeRepository) {
    let counts = repo.counts().await.unwrap();
    assert_eq!((counts.total, counts.active), (0, 0));

    let (total, items) = page(repo, EmployeeSearch::new(None, None, None, 1, 20)).await;
    assert_eq!(total, 0);
    assert!(items.is_empty());
}

pub async fn search_ignores_case_and_matches_wildcards_literally(repo: &dyn EmployeeRepository) {
    repo.add(&input("Half", "Off", "fifty%@example.com")).await.unwrap();
    repo.add(&input("Under_score", "Name", "under@example.com")).await.unwrap();
    repo.add(&input("John", "SMITH", "john@example.com")).await.unwrap();
    repo.add(&input("Plain", "Person", "plain@example.com")).await.unwrap();

    let (total, items) = page(repo, EmployeeSearch::new(Some("%"), None, None, 1, 20)).await;
    assert_eq!(total, 1);
    assert_eq!(first_names(&items), vec!["Half"]);

    let (total, items) = page(repo, EmployeeSearch::new(Some("_"), None, None, 1, 20)).await;
    assert_eq!(total, 1);
    assert_eq!(first_names(&items), vec!["Under_score"]);

    let (total, items) = page(repo, EmployeeSearch::new(Some("smith"), None, None, 1, 20)).await;
    assert_eq!(total, 1);
    assert_eq!(first_names(&items), vec!["John"]);
}

/// For repositories built with case-sensitive search.
pub async fn case_sensitive_search_respects_case(repo: &dyn EmployeeRepository) {
    repo.add(&input("John", "SMITH", "john@example.com")).await.unwrap();
    repo.add(&input("Jane", "Smith", "jane@example.com")).await.unwrap();

    let (total, items) = page(repo, EmployeeSearch::new(Some("Smith"), None, None, 1, 20)).await;
    assert_eq!(total, 1);
    assert_eq!(first_names(&items), vec!["Jane"]);

    let (total, _) = page(repo, EmployeeSearch::new(Some("smith"), None, None, 1, 20)).await;
    assert_eq!(total, 0);
}

pub async fn missing_birth_dates_sort_first_ascending_last_descending(repo: &dyn EmployeeRepository) {
    repo.add(&dated("Late", "late@example.com", NaiveDate::from_ymd_opt(1990, 1, 1)))
        .await
        .unwrap();
    repo.add(&dated("Unknown", "unknown@example.com", None)).await.unwrap();
    repo.add(&dated("Early", "early@example.com", NaiveDate::from_ymd_opt(1950, 1, 1)))
        .await
        .unwrap();

    let (_, asc) = page(repo, EmployeeSearch::new(None, Some("dateOfBirth"), None, 1, 20)).await;
    assert_eq!(first_names(&asc), vec!["Unknown", "Early", "Late"]);

    let (_, desc) = page(repo, EmployeeSearch::new(None, Some("dateOfBirth"), Some("desc"), 1, 20)).await;
    assert_eq!(first_names(&desc), vec!["Late", "Early", "Unknown"]);
}

pub async fn ties_break_on_id(repo: &dyn EmployeeRepository) {
    repo.add(&input("Same", "B", "b@example.com")).await.unwrap();
    repo.add(&input("Same", "A", "a@example.com")).await.unwrap();
    repo.add(&input("Same", "C", "c@example.com")).await.unwrap();

    let (_, items) = page(repo, EmployeeSearch::new(None, Some("firstName"), Some("desc"), 1, 20)).await;
    let last_names: Vec<&str> = items.iter().map(|e| e.last_name.as_str()).collect();
    assert_eq!(last_names, vec!["B", "A", "C"]);
}

pub async fn paging_edges_return_empty_pages_with_totals(repo: &dyn EmployeeRepository) {
    for i in 1..=5 {
        repo.add(&input(&format!("First{i}"), "Tester", &format!("user{i}@example.com")))
            .await
            .unwrap();
    }

    let (total, items) = page(repo, EmployeeSearch::new(None, None, None, 1, 0)).await;
    assert_eq!(total, 5);
    assert!(items.is_empty());

    let (total, items) = page(repo, EmployeeSearch::new(None, None, None, 1, -3)).await;
    assert_eq!(total, 5);
    assert!(items.is_empty());

    let (total, items) = page(repo, EmployeeSearch::new(None, None, None, 4, 2)).await;
    assert_eq!(total, 5);
    assert!(items.is_empty());

    let (_, items) = page(repo, EmployeeSearch::new(None, None, None, 3, 2)).await;
    assert_eq!(first_names(&items), vec!["First5"]);

    let (_, items) = page(repo, EmployeeSearch::new(None, None, None, 1, 500)).await;
    assert_eq!(items.len(), 5);
}
