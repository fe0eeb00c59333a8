#![allow(dead_code)]

use small_mapper::{coded_enum, record_schema, Decimal, TextRecord};

coded_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Status {
        Active { code = "A", description = "Active account" },
        Inactive { code = "I" },
        Unknown { default },
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Unknown
    }
}

// No default member: unknown codes and nulls cannot be resolved.
coded_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Priority {
        Low { code = "L" },
        High { code = "H" },
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}

// Shares the code "A" with Status on purpose.
coded_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Shade {
        Light { code = "A" },
        Dark { default },
    }
}

impl Default for Shade {
    fn default() -> Self {
        Shade::Dark
    }
}

// Sms has neither a code nor the default marker.
coded_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Channel {
        Email { code = "E", default },
        Sms,
        Post { code = "P" },
    }
}

// A code with surrounding whitespace.
coded_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Slot {
        Padded { code = " A " },
        Tight { code = "A" },
        Empty { default },
    }
}

impl Default for Slot {
    fn default() -> Self {
        Slot::Empty
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Booking {
    pub slot: Slot,
}

record_schema! {
    #[constructible]
    Booking {
        slot: Slot,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i32,
    pub status: Status,
}

record_schema! {
    #[constructible]
    Person {
        name: String,
        age: i32,
        status: Status,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonText {
    pub name: String,
    pub age: String,
    pub status: String,
}

record_schema! {
    #[constructible]
    PersonText {
        name: String,
        age: String,
        status: String,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub score: Option<f64>,
    pub active: Option<bool>,
    pub balance: Option<Decimal>,
    pub status: Option<Status>,
}

record_schema! {
    #[constructible]
    Profile {
        name: Option<String>,
        age: Option<i32>,
        score: Option<f64>,
        active: Option<bool>,
        balance: Option<Decimal>,
        status: Option<Status>,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores {
    pub name: String,
    pub age: i32,
    pub score: f64,
    pub active: bool,
    pub balance: Decimal,
}

record_schema! {
    #[constructible]
    Scores {
        name: String,
        age: i32,
        score: f64,
        active: bool,
        balance: Decimal,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Task {
    pub title: String,
    pub priority: Priority,
}

record_schema! {
    #[constructible]
    Task {
        title: String,
        priority: Priority,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Swatch {
    pub name: String,
    pub status: Shade,
}

record_schema! {
    #[constructible]
    Swatch {
        name: String,
        status: Shade,
    }
}

/// Has no registered constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub name: String,
}

record_schema! {
    Account {
        id: i64,
        name: String,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub amount: Decimal,
    pub note: String,
    pub status: Status,
}

record_schema! {
    #[constructible]
    Invoice {
        #[csv(1, "Number")]
        number: String,
        #[csv(2, "Amount")]
        amount: Decimal,
        note: String,
        #[csv(3, "Status")]
        status: Status,
    }
}

pub fn person_row(name: &str, age: &str) -> TextRecord {
    TextRecord::new("person row").with("Name", name).with("Age", age)
}

pub fn sample_invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            number: "INV-001".to_string(),
            amount: Decimal::new(12050, 2),
            note: "not exported".to_string(),
            status: Status::Active,
        },
        Invoice {
            number: "INV-002".to_string(),
            amount: Decimal::new(7, 0),
            note: String::new(),
            status: Status::Unknown,
        },
    ]
}
