#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use piggybank_core::domain::{Category, SavingsGoal, Snapshot, Transaction};
use rust_decimal::Decimal;

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn amount(value: i64) -> Decimal {
    Decimal::from(value)
}

pub fn now() -> DateTime<Utc> {
    at(2024, 3, 20)
}

pub fn categories() -> Vec<Category> {
    vec![
        Category::new(1, "Food & Dining").with_style("restaurant", "#FF5722"),
        Category::new(2, "Transportation").with_style("directions_car", "#009688"),
        Category::new(3, "Entertainment").with_style("local_movies", "#673AB7"),
        Category::new(4, "Shopping").with_style("shopping_bag", "#FFC107"),
    ]
}

pub fn goals() -> Vec<SavingsGoal> {
    vec![
        SavingsGoal::new(1, "Emergency Fund", amount(50000), amount(10000))
            .with_style("savings", "#4CAF50"),
        SavingsGoal::new(2, "Vacation", amount(1000), amount(900))
            .with_deadline(at(2024, 6, 1)),
        SavingsGoal::new(3, "Laptop", amount(5000), amount(100)),
        SavingsGoal::new(4, "Phone", amount(800), amount(800)),
    ]
}

/// Three months of activity ending at [`now`].
pub fn transactions() -> Vec<Transaction> {
    vec![
        Transaction::deposit(1, amount(20000), at(2024, 1, 2)).with_description("Salary"),
        Transaction::expense(2, 1, amount(1200), at(2024, 1, 14)),
        Transaction::deposit(3, amount(5000), at(2024, 2, 2)).with_description("Salary"),
        Transaction::expense(4, 2, amount(800), at(2024, 2, 9)),
        Transaction::expense(5, 1, amount(700), at(2024, 2, 18)),
        Transaction::deposit(6, amount(8000), at(2024, 3, 1)).with_description("Salary"),
        Transaction::deposit(7, amount(500), at(2024, 3, 5))
            .with_goal(2)
            .with_description("Transfer to Vacation"),
        Transaction::expense(8, 2, amount(700), at(2024, 3, 7)),
        Transaction::expense(9, 1, amount(300), at(2024, 3, 12)),
        Transaction::withdrawal(10, amount(1000), at(2024, 3, 15)),
    ]
}

pub fn snapshot() -> Snapshot {
    Snapshot::new(transactions(), goals(), categories())
}
