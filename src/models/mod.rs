pub mod settings;
pub mod transaction;

pub use settings::UserSettings;
pub use transaction::{
    Category, Frequency, NewTransaction, PaymentMethod, Tag, Transaction, TransactionKind,
};
