use soroban_sdk::{contracttype, Address, Env, String};

use crate::error::CampaignError;

pub type CampaignId = u32;
pub type RequestIndex = u32;

pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days

// Instance storage
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Token,
    CampaignCount,
}

// Persistent storage, one entry per campaign / request / membership
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    Approver(CampaignId, Address),
    Contribution(CampaignId, Address),
    Request(CampaignId, RequestIndex),
    Approval(CampaignId, RequestIndex, Address), // (Campaign, Request, Approver)
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub id: CampaignId,
    pub manager: Address,
    pub minimum_contribution: i128,
    pub approvers_count: u32,
    pub balance: i128,        // Held for this campaign, net of finalized requests
    pub total_raised: i128,
    pub requests_count: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Request {
    pub description: String,
    pub value: i128,
    pub recipient: Address,
    pub approval_count: u32,
    pub complete: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct CampaignSummary {
    pub minimum_contribution: i128,
    pub balance: i128,
    pub requests_count: u32,
    pub approvers_count: u32,
    pub manager: Address,
}

pub fn extend_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

pub fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

pub fn get_token(env: &Env) -> Address {
    // Set by the constructor, always present once deployed.
    env.storage().instance().get(&DataKey::Token).unwrap()
}

pub fn get_campaign(env: &Env, campaign_id: CampaignId) -> Result<Campaign, CampaignError> {
    env.storage()
        .persistent()
        .get(&PersistentKey::Campaign(campaign_id))
        .ok_or(CampaignError::CampaignNotFound)
}

pub fn set_campaign(env: &Env, campaign: &Campaign) {
    let key = PersistentKey::Campaign(campaign.id);
    env.storage().persistent().set(&key, campaign);
    extend_persistent(env, &key);
}

pub fn get_request(
    env: &Env,
    campaign: &Campaign,
    index: RequestIndex,
) -> Result<Request, CampaignError> {
    if index >= campaign.requests_count {
        return Err(CampaignError::NotFound);
    }
    env.storage()
        .persistent()
        .get(&PersistentKey::Request(campaign.id, index))
        .ok_or(CampaignError::NotFound)
}

pub fn set_request(env: &Env, campaign_id: CampaignId, index: RequestIndex, request: &Request) {
    let key = PersistentKey::Request(campaign_id, index);
    env.storage().persistent().set(&key, request);
    extend_persistent(env, &key);
}

/// Key-presence membership; a stored `true` marks the member.
pub fn is_member(env: &Env, key: &PersistentKey) -> bool {
    env.storage().persistent().get(key).unwrap_or(false)
}

pub fn insert_member(env: &Env, key: &PersistentKey) {
    env.storage().persistent().set(key, &true);
    extend_persistent(env, key);
}

pub fn get_contribution(env: &Env, campaign_id: CampaignId, contributor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&PersistentKey::Contribution(campaign_id, contributor.clone()))
        .unwrap_or(0)
}

pub fn set_contribution(env: &Env, campaign_id: CampaignId, contributor: &Address, amount: i128) {
    let key = PersistentKey::Contribution(campaign_id, contributor.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent(env, &key);
}
