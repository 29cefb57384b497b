use strum::{AsRefStr, Display as StrumDisplay};

use crate::domain::analysis::{PricePoint, StockInfo};

/// Which kind of data a card projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr)]
pub enum CardKind {
    #[strum(serialize = "stock")]
    Stock,
    #[strum(serialize = "news")]
    News,
}

/// Raw data behind a card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardPayload {
    Stock(StockInfo),
    News(Vec<String>),
}

impl CardPayload {
    pub fn kind(&self) -> CardKind {
        match self {
            CardPayload::Stock(_) => CardKind::Stock,
            CardPayload::News(_) => CardKind::News,
        }
    }
}

/// A rendered data card: the payload plus its self-contained markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub payload: CardPayload,
    pub html: String,
}

impl Card {
    pub fn kind(&self) -> CardKind {
        self.payload.kind()
    }
}

/// Everything the detailed view needs; also what gets downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveReport {
    pub company: String,
    pub report_text: String,
    pub stock_info: Option<StockInfo>,
    pub chart_data: Vec<PricePoint>,
}

/// Conversation entry that opens the detailed view when activated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTeaser {
    pub report: ActiveReport,
    /// Converted narrative shown inline under the teaser heading.
    pub preview_html: String,
}

/// One unit of the append-only interaction log.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationEntry {
    UserMessage { text: String },
    SystemMessage { text: String },
    DataCard(Card),
    ReportTeaser(ReportTeaser),
}

impl ConversationEntry {
    pub fn user(text: impl Into<String>) -> Self {
        ConversationEntry::UserMessage { text: text.into() }
    }

    pub fn system(text: impl Into<String>) -> Self {
        ConversationEntry::SystemMessage { text: text.into() }
    }

    /// Plain text of message entries; `None` for cards and teasers.
    pub fn text(&self) -> Option<&str> {
        match self {
            ConversationEntry::UserMessage { text } | ConversationEntry::SystemMessage { text } => {
                Some(text)
            }
            _ => None,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, ConversationEntry::UserMessage { .. })
    }

    pub fn as_card(&self) -> Option<&Card> {
        match self {
            ConversationEntry::DataCard(card) => Some(card),
            _ => None,
        }
    }

    pub fn as_teaser(&self) -> Option<&ReportTeaser> {
        match self {
            ConversationEntry::ReportTeaser(teaser) => Some(teaser),
            _ => None,
        }
    }
}
