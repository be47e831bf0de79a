use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CampaignError {
    Unauthorized = 1,
    NotFound = 2,
    InsufficientContribution = 3,
    InsufficientApprovals = 4,
    InsufficientFunds = 5,
    DuplicateApproval = 6,
    AlreadyFinalized = 7,
    CampaignNotFound = 8,
    InvalidAmount = 9,
    Overflow = 10,
}
