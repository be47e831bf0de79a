use soroban_sdk::{Address, Env, Vec};

use crate::error::CampaignError;
use crate::events::{self, CampaignCreatedEvent};
use crate::storage::{extend_instance, set_campaign, Campaign, CampaignId, DataKey};

/// Stores a fresh campaign under the next id. Ids are dense, so the counter
/// alone records the deployed sequence.
pub fn create(
    env: &Env,
    manager: Address,
    minimum_contribution: i128,
) -> Result<CampaignId, CampaignError> {
    if minimum_contribution <= 0 {
        return Err(CampaignError::InvalidAmount);
    }

    let campaign_id: CampaignId = count(env);
    let next = campaign_id.checked_add(1).ok_or(CampaignError::Overflow)?;

    let campaign = Campaign {
        id: campaign_id,
        manager: manager.clone(),
        minimum_contribution,
        approvers_count: 0,
        balance: 0,
        total_raised: 0,
        requests_count: 0,
    };
    set_campaign(env, &campaign);

    env.storage().instance().set(&DataKey::CampaignCount, &next);
    extend_instance(env);

    events::emit_campaign_created(
        env,
        CampaignCreatedEvent {
            campaign_id,
            manager,
            minimum_contribution,
        },
    );

    Ok(campaign_id)
}

pub fn list(env: &Env) -> Vec<CampaignId> {
    let mut deployed = Vec::new(env);
    for campaign_id in 0..count(env) {
        deployed.push_back(campaign_id);
    }
    deployed
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::CampaignCount).unwrap_or(0)
}
