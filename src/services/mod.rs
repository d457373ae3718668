pub mod ledger;
pub mod statement;
pub mod trend;
