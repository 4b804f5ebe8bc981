use anchor_lang::prelude::*;

#[error_code]
pub enum TlcError {
    #[msg("Invalid circle configuration")]
    InvalidConfiguration,
    #[msg("Identity is not on the circle trust list")]
    NotWhitelisted,
    #[msg("Identity is already a member")]
    AlreadyMember,
    #[msg("Circle is full")]
    CircleFull,
    #[msg("Member already contributed this round")]
    AlreadyContributed,
    #[msg("Contribution must equal the configured amount")]
    WrongAmount,
    #[msg("Round is closed for contributions")]
    RoundClosed,
    #[msg("Round is not ready to disburse")]
    RoundNotReady,
    #[msg("Round already disbursed")]
    AlreadyDisbursed,
    #[msg("Custody transfer failed")]
    TransferFailed,
    #[msg("Circle paused")]
    CirclePaused,
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Operation not allowed in the current circle state")]
    InvalidState,
    #[msg("Payment medium does not match the circle")]
    UnsupportedMedium,
    #[msg("No eligible recipient left")]
    NoEligibleRecipient,
    #[msg("Identity is not an active member")]
    NotMember,
    #[msg("Treasury balance too low for release")]
    InsufficientTreasury,
    #[msg("Recipient account does not match the selected recipient")]
    RecipientMismatch,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Text field too long")]
    TextTooLong,

    // -----------------
    // Trust list
    // -----------------
    #[msg("Trust list is full")]
    TrustListFull,
    #[msg("Identity already trusted")]
    AlreadyTrusted,
    #[msg("Identity not in trust list")]
    NotTrusted,

    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("A dispute is already active")]
    DisputeActive,
    #[msg("No active dispute")]
    NoDispute,
    #[msg("Account belongs to another circle")]
    WrongCircle,
}
