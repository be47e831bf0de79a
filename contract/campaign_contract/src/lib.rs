#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

mod campaign;
mod error;
mod events;
mod registry;
mod storage;

pub use error::CampaignError;
pub use storage::{Campaign, CampaignId, CampaignSummary, Request, RequestIndex};

use storage::{extend_instance, DataKey, PersistentKey};

#[contract]
pub struct CampaignContract;

#[contractimpl]
impl CampaignContract {
    /// Deploy the factory, fixing the token every campaign is funded in.
    pub fn __constructor(env: Env, token: Address) {
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::CampaignCount, &0u32);
        extend_instance(&env);
    }

    /// Create a campaign managed by `manager`. Returns its id.
    pub fn create_campaign(
        env: Env,
        manager: Address,
        minimum_contribution: i128,
    ) -> Result<CampaignId, CampaignError> {
        manager.require_auth();
        registry::create(&env, manager, minimum_contribution)
    }

    /// Every campaign id, in creation order.
    pub fn get_deployed_campaigns(env: Env) -> Vec<CampaignId> {
        registry::list(&env)
    }

    pub fn campaign_count(env: Env) -> u32 {
        registry::count(&env)
    }

    /// Contribute at least the campaign minimum; the first contribution makes
    /// `contributor` an approver.
    pub fn contribute(
        env: Env,
        campaign_id: CampaignId,
        contributor: Address,
        amount: i128,
    ) -> Result<(), CampaignError> {
        contributor.require_auth();
        campaign::contribute(&env, campaign_id, contributor, amount)
    }

    /// Manager only. Returns the new request's index.
    pub fn create_request(
        env: Env,
        campaign_id: CampaignId,
        manager: Address,
        description: String,
        value: i128,
        recipient: Address,
    ) -> Result<RequestIndex, CampaignError> {
        manager.require_auth();
        campaign::create_request(&env, campaign_id, manager, description, value, recipient)
    }

    pub fn approve_request(
        env: Env,
        campaign_id: CampaignId,
        index: RequestIndex,
        approver: Address,
    ) -> Result<(), CampaignError> {
        approver.require_auth();
        campaign::approve_request(&env, campaign_id, index, approver)
    }

    /// Manager only. Pays the request out once a strict majority of all
    /// approvers has approved it.
    pub fn finalize_request(
        env: Env,
        campaign_id: CampaignId,
        index: RequestIndex,
        manager: Address,
    ) -> Result<(), CampaignError> {
        manager.require_auth();
        campaign::finalize_request(&env, campaign_id, index, manager)
    }

    // View functions

    pub fn get_campaign(env: Env, campaign_id: CampaignId) -> Result<Campaign, CampaignError> {
        storage::get_campaign(&env, campaign_id)
    }

    pub fn manager(env: Env, campaign_id: CampaignId) -> Result<Address, CampaignError> {
        Ok(storage::get_campaign(&env, campaign_id)?.manager)
    }

    pub fn minimum_contribution(env: Env, campaign_id: CampaignId) -> Result<i128, CampaignError> {
        Ok(storage::get_campaign(&env, campaign_id)?.minimum_contribution)
    }

    pub fn approvers(
        env: Env,
        campaign_id: CampaignId,
        approver: Address,
    ) -> Result<bool, CampaignError> {
        storage::get_campaign(&env, campaign_id)?;
        Ok(storage::is_member(
            &env,
            &PersistentKey::Approver(campaign_id, approver),
        ))
    }

    pub fn approvers_count(env: Env, campaign_id: CampaignId) -> Result<u32, CampaignError> {
        Ok(storage::get_campaign(&env, campaign_id)?.approvers_count)
    }

    pub fn get_request(
        env: Env,
        campaign_id: CampaignId,
        index: RequestIndex,
    ) -> Result<Request, CampaignError> {
        let campaign = storage::get_campaign(&env, campaign_id)?;
        storage::get_request(&env, &campaign, index)
    }

    pub fn get_requests_count(env: Env, campaign_id: CampaignId) -> Result<u32, CampaignError> {
        Ok(storage::get_campaign(&env, campaign_id)?.requests_count)
    }

    pub fn has_approved(
        env: Env,
        campaign_id: CampaignId,
        index: RequestIndex,
        approver: Address,
    ) -> Result<bool, CampaignError> {
        let campaign = storage::get_campaign(&env, campaign_id)?;
        storage::get_request(&env, &campaign, index)?;
        Ok(storage::is_member(
            &env,
            &PersistentKey::Approval(campaign_id, index, approver),
        ))
    }

    pub fn get_contribution(
        env: Env,
        campaign_id: CampaignId,
        contributor: Address,
    ) -> Result<i128, CampaignError> {
        storage::get_campaign(&env, campaign_id)?;
        Ok(storage::get_contribution(&env, campaign_id, &contributor))
    }

    pub fn get_summary(env: Env, campaign_id: CampaignId) -> Result<CampaignSummary, CampaignError> {
        let campaign = storage::get_campaign(&env, campaign_id)?;
        Ok(CampaignSummary {
            minimum_contribution: campaign.minimum_contribution,
            balance: campaign.balance,
            requests_count: campaign.requests_count,
            approvers_count: campaign.approvers_count,
            manager: campaign.manager,
        })
    }

    pub fn get_token(env: Env) -> Address {
        storage::get_token(&env)
    }
}
