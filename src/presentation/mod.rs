pub mod cards;
pub mod formatting;
pub mod markup;
pub mod report;
