use thiserror::Error;

/// Fatal problems with the board data fed into the report pipeline. A comment that doesn't look
/// like a time entry is never an error, it's just skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("action #{index}: can't parse {field} {value:?}: {reason}")]
    InputFormat {
        index: usize,
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("action #{index}: missing field {field}")]
    MissingField { index: usize, field: &'static str },
    /// Spend of a card, or the running total up to that card, is beyond [Hours::MAX].
    ///
    /// [Hours::MAX]: crate::utils::hours::Hours::MAX
    #[error("card {card_id}: {hours} spent hours don't fit into a report")]
    SpendOutOfRange { card_id: String, hours: String },
}
