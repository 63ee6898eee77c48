#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use opledger_core::{
    OperationCreateUpdate, OperationService, OperationTypeCreateUpdate, OperationTypeDto,
    OperationTypeService, Session, SqliteOperationRepository, SqliteOperationTypeRepository,
};

pub type TypeService = OperationTypeService<SqliteOperationTypeRepository>;
pub type LedgerOperationService =
    OperationService<SqliteOperationRepository, SqliteOperationTypeRepository>;

/// Both services wired onto one in-memory session.
pub struct Ledger {
    pub session: Session,
    pub types: TypeService,
    pub operations: LedgerOperationService,
}

pub fn open_ledger() -> Ledger {
    let session = Session::open_in_memory().unwrap();
    Ledger {
        types: OperationTypeService::new(SqliteOperationTypeRepository::new(session.clone())),
        operations: OperationService::new(
            SqliteOperationRepository::new(session.clone()),
            SqliteOperationTypeRepository::new(session.clone()),
        ),
        session,
    }
}

pub fn type_input(name: &str, is_income: bool) -> OperationTypeCreateUpdate {
    OperationTypeCreateUpdate {
        name: Some(name.to_string()),
        description: Some("-".to_string()),
        is_income,
    }
}

pub fn seed_type(ledger: &Ledger, name: &str, is_income: bool) -> OperationTypeDto {
    ledger
        .types
        .create_operation_type(Some(type_input(name, is_income)))
        .unwrap()
}

pub fn operation_input(type_name: &str, amount: i32, created: NaiveDateTime) -> OperationCreateUpdate {
    OperationCreateUpdate {
        name: Some("payment".to_string()),
        amount,
        created: Some(created),
        description: Some("desc".to_string()),
        type_name: Some(type_name.to_string()),
    }
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, date: u32, hour: u32, minute: u32) -> NaiveDateTime {
    day(year, month, date).and_hms_opt(hour, minute, 0).unwrap()
}
