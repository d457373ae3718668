use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Direction of a transaction. The stored amount is always a non-negative
/// magnitude; the sign is derived from the kind at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// +1 for income, -1 for expense.
    pub fn sign(&self) -> i64 {
        match self {
            Self::Income => 1,
            Self::Expense => -1,
        }
    }
}

/// Recurrence class. One-time entries affect the asset total only on their
/// anchor date; the others are rates that amortize to a daily equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    OneTime,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "one_time" => Some(Self::OneTime),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneTime => "One-time",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    pub fn all() -> &'static [Frequency] {
        &[
            Self::OneTime,
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Yearly,
        ]
    }
}

/// Expense classification in the consumption/waste/investment sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Consumption,
    Waste,
    Investment,
}

impl Category {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "consumption" => Some(Self::Consumption),
            "waste" => Some(Self::Waste),
            "investment" => Some(Self::Investment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consumption => "consumption",
            Self::Waste => "waste",
            Self::Investment => "investment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Consumption => "Consumption",
            Self::Waste => "Waste",
            Self::Investment => "Investment",
        }
    }

    pub fn all() -> &'static [Category] {
        &[Self::Consumption, Self::Waste, Self::Investment]
    }
}

/// Spending tag used for statement breakdowns. Unknown stored values fall
/// back to `Other` so foreign rows still land in a statement bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Food,
    Daily,
    Transport,
    Housing,
    Social,
    Fun,
    Medical,
    Education,
    Other,
}

impl Tag {
    pub fn parse(s: &str) -> Self {
        match s {
            "food" => Self::Food,
            "daily" => Self::Daily,
            "transport" => Self::Transport,
            "housing" => Self::Housing,
            "social" => Self::Social,
            "fun" => Self::Fun,
            "medical" => Self::Medical,
            "education" => Self::Education,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Daily => "daily",
            Self::Transport => "transport",
            Self::Housing => "housing",
            Self::Social => "social",
            Self::Fun => "fun",
            Self::Medical => "medical",
            Self::Education => "education",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "🍱 Food",
            Self::Daily => "🧻 Daily goods",
            Self::Transport => "🚃 Transport",
            Self::Housing => "🏠 Housing",
            Self::Social => "🍻 Social",
            Self::Fun => "🎮 Fun",
            Self::Medical => "🏥 Medical",
            Self::Education => "🎓 Education",
            Self::Other => "❓ Other",
        }
    }

    /// Whether one-time spending under this tag counts as a running cost
    /// (necessary living expense) rather than discretionary spending.
    pub fn is_running_cost(&self) -> bool {
        matches!(
            self,
            Self::Food
                | Self::Daily
                | Self::Transport
                | Self::Housing
                | Self::Medical
                | Self::Education
        )
    }

    pub fn all() -> &'static [Tag] {
        &[
            Self::Food,
            Self::Daily,
            Self::Transport,
            Self::Housing,
            Self::Social,
            Self::Fun,
            Self::Medical,
            Self::Education,
            Self::Other,
        ]
    }
}

/// How a transaction was paid, display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Credit,
    Pay,
    Cash,
    Bank,
}

impl PaymentMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "credit" => Some(Self::Credit),
            "pay" => Some(Self::Pay),
            "cash" => Some(Self::Cash),
            "bank" => Some(Self::Bank),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Pay => "pay",
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Credit => "💳 Credit",
            Self::Pay => "📱 E-money",
            Self::Cash => "💵 Cash",
            Self::Bank => "🏦 Bank",
        }
    }

    pub fn all() -> &'static [PaymentMethod] {
        &[Self::Credit, Self::Pay, Self::Cash, Self::Bank]
    }
}

macro_rules! text_sql_enum {
    ($ty:ty, $what:literal) => {
        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let s = value.as_str()?;
                <$ty>::parse(s).ok_or_else(|| {
                    FromSqlError::Other(format!(concat!("unknown ", $what, ": {}"), s).into())
                })
            }
        }

        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }
    };
}

text_sql_enum!(TransactionKind, "transaction kind");
text_sql_enum!(Frequency, "frequency");
text_sql_enum!(Category, "category");
text_sql_enum!(PaymentMethod, "payment method");

// Tag decodes infallibly: anything unrecognized becomes Other.
impl FromSql for Tag {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(Tag::parse(value.as_str()?))
    }
}

impl ToSql for Tag {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub name: String,
    /// Non-negative magnitude in whole currency units.
    pub amount: i64,
    pub kind: TransactionKind,
    pub frequency: Frequency,
    pub category: Option<Category>,
    pub tag: Option<Tag>,
    pub payment_method: Option<PaymentMethod>,
    /// Anchor date: the calendar day the transaction belongs to.
    pub date: NaiveDate,
    pub created_at: String,
}

impl Transaction {
    /// Magnitude with the kind's sign applied.
    pub fn signed_amount(&self) -> i64 {
        self.kind.sign() * self.amount
    }

    pub fn is_one_time(&self) -> bool {
        self.frequency == Frequency::OneTime
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Signed daily-equivalent value; zero for one-time entries.
    pub fn daily_value(&self) -> f64 {
        crate::services::ledger::normalize(self.amount, self.frequency, self.kind)
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn tag_label(&self) -> &'static str {
        self.tag.map(|t| t.label()).unwrap_or("")
    }

    pub fn payment_label(&self) -> &'static str {
        self.payment_method.map(|p| p.label()).unwrap_or("")
    }

    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    pub fn matches_frequency(&self, frequency: &Frequency) -> bool {
        self.frequency == *frequency
    }

    pub fn matches_category(&self, category: &Category) -> bool {
        self.category == Some(*category)
    }

    pub fn matches_tag(&self, tag: &Tag) -> bool {
        self.tag == Some(*tag)
    }

    pub fn matches_payment(&self, method: &PaymentMethod) -> bool {
        self.payment_method == Some(*method)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub name: String,
    pub amount: i64,
    pub kind: TransactionKind,
    pub frequency: Frequency,
    pub category: Option<Category>,
    pub tag: Option<Tag>,
    pub payment_method: Option<PaymentMethod>,
    pub date: NaiveDate,
}
