use anchor_lang::prelude::*;

#[event]
pub struct Staked {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
}

#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
}

#[event]
pub struct RewardPaid {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardAdded {
    pub pool: Pubkey,
    pub amount: u64,
    pub reward_rate: u128,
    pub period_finish: i64,
}

#[event]
pub struct RewardsDurationUpdated {
    pub pool: Pubkey,
    pub duration: u64,
}
