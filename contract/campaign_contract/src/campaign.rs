use soroban_sdk::{log, token, Address, Env, String};

use crate::error::CampaignError;
use crate::events::{
    self, ApproverAddedEvent, ContributedEvent, RequestApprovedEvent, RequestCreatedEvent,
    RequestFinalizedEvent,
};
use crate::storage::{
    extend_persistent, get_campaign, get_contribution, get_request, get_token, insert_member, is_member,
    set_campaign, set_contribution, set_request, CampaignId, PersistentKey, Request,
    RequestIndex,
};

/// Strict majority of every distinct contributor the campaign has ever had.
/// A tie does not pass, and contributors who join after a request was
/// created still count towards the denominator.
pub fn has_majority(approval_count: u32, approvers_count: u32) -> bool {
    (approval_count as u64) * 2 > approvers_count as u64
}

pub fn contribute(
    env: &Env,
    campaign_id: CampaignId,
    contributor: Address,
    amount: i128,
) -> Result<(), CampaignError> {
    let mut campaign = get_campaign(env, campaign_id)?;

    if amount < campaign.minimum_contribution {
        return Err(CampaignError::InsufficientContribution);
    }

    let balance = campaign.balance.checked_add(amount).ok_or(CampaignError::Overflow)?;
    let total_raised = campaign
        .total_raised
        .checked_add(amount)
        .ok_or(CampaignError::Overflow)?;
    let contributed = get_contribution(env, campaign_id, &contributor)
        .checked_add(amount)
        .ok_or(CampaignError::Overflow)?;

    let approver_key = PersistentKey::Approver(campaign_id, contributor.clone());
    let first_contribution = !is_member(env, &approver_key);
    if first_contribution {
        campaign.approvers_count = campaign
            .approvers_count
            .checked_add(1)
            .ok_or(CampaignError::Overflow)?;
    }

    let token_client = token::Client::new(env, &get_token(env));
    token_client.transfer(&contributor, &env.current_contract_address(), &amount);

    campaign.balance = balance;
    campaign.total_raised = total_raised;
    set_contribution(env, campaign_id, &contributor, contributed);
    if first_contribution {
        insert_member(env, &approver_key);
    } else {
        extend_persistent(env, &approver_key);
    }
    set_campaign(env, &campaign);

    log!(env, "contribution accepted", campaign_id, amount);

    if first_contribution {
        events::emit_approver_added(
            env,
            ApproverAddedEvent {
                campaign_id,
                approver: contributor.clone(),
                approvers_count: campaign.approvers_count,
            },
        );
    }
    events::emit_contributed(
        env,
        ContributedEvent {
            campaign_id,
            contributor,
            amount,
            balance,
        },
    );

    Ok(())
}

pub fn create_request(
    env: &Env,
    campaign_id: CampaignId,
    caller: Address,
    description: String,
    value: i128,
    recipient: Address,
) -> Result<RequestIndex, CampaignError> {
    let mut campaign = get_campaign(env, campaign_id)?;

    if caller != campaign.manager {
        return Err(CampaignError::Unauthorized);
    }
    // Funds are only checked at finalization so requests can be queued early.
    if value <= 0 {
        return Err(CampaignError::InvalidAmount);
    }

    let index = campaign.requests_count;
    campaign.requests_count = index.checked_add(1).ok_or(CampaignError::Overflow)?;

    let request = Request {
        description,
        value,
        recipient: recipient.clone(),
        approval_count: 0,
        complete: false,
    };
    set_request(env, campaign_id, index, &request);
    set_campaign(env, &campaign);

    events::emit_request_created(
        env,
        RequestCreatedEvent {
            campaign_id,
            index,
            value,
            recipient,
        },
    );

    Ok(index)
}

pub fn approve_request(
    env: &Env,
    campaign_id: CampaignId,
    index: RequestIndex,
    approver: Address,
) -> Result<(), CampaignError> {
    let campaign = get_campaign(env, campaign_id)?;
    let mut request = get_request(env, &campaign, index)?;

    if !is_member(env, &PersistentKey::Approver(campaign_id, approver.clone())) {
        return Err(CampaignError::Unauthorized);
    }

    let approval_key = PersistentKey::Approval(campaign_id, index, approver.clone());
    if is_member(env, &approval_key) {
        return Err(CampaignError::DuplicateApproval);
    }
    if request.complete {
        return Err(CampaignError::AlreadyFinalized);
    }

    request.approval_count = request
        .approval_count
        .checked_add(1)
        .ok_or(CampaignError::Overflow)?;

    insert_member(env, &approval_key);
    set_request(env, campaign_id, index, &request);

    events::emit_request_approved(
        env,
        RequestApprovedEvent {
            campaign_id,
            index,
            approver,
            approval_count: request.approval_count,
        },
    );

    Ok(())
}

pub fn finalize_request(
    env: &Env,
    campaign_id: CampaignId,
    index: RequestIndex,
    caller: Address,
) -> Result<(), CampaignError> {
    let mut campaign = get_campaign(env, campaign_id)?;

    if caller != campaign.manager {
        return Err(CampaignError::Unauthorized);
    }

    let mut request = get_request(env, &campaign, index)?;

    if request.complete {
        return Err(CampaignError::AlreadyFinalized);
    }
    if !has_majority(request.approval_count, campaign.approvers_count) {
        return Err(CampaignError::InsufficientApprovals);
    }
    if campaign.balance < request.value {
        return Err(CampaignError::InsufficientFunds);
    }

    let token_client = token::Client::new(env, &get_token(env));
    token_client.transfer(&env.current_contract_address(), &request.recipient, &request.value);

    campaign.balance -= request.value;
    request.complete = true;

    set_request(env, campaign_id, index, &request);
    set_campaign(env, &campaign);

    log!(env, "request finalized", campaign_id, index);

    events::emit_request_finalized(
        env,
        RequestFinalizedEvent {
            campaign_id,
            index,
            recipient: request.recipient,
            value: request.value,
        },
    );

    Ok(())
}
