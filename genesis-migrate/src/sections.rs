//! Module sections that the token inflation migration writes wholesale.
//!
//! Each struct mirrors the JSON shape the chain expects at init genesis.
//! Dynamic collections are `Option<Vec<Value>>` so that `None` serializes to
//! `null`, which tells the chain to start them empty.

use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BOND_DENOM: &str = "tru";

pub const UNBONDING_TIME: Duration = Duration::from_secs(21 * 24 * 60 * 60);
pub const MAX_VALIDATORS: u16 = 100;
pub const MAX_ENTRIES: u16 = 7;

pub const GOV_MIN_DEPOSIT: u64 = 1000;
pub const GOV_DEPOSIT_PERIOD: Duration = Duration::from_secs(2 * 24 * 60 * 60);
pub const GOV_VOTING_PERIOD: Duration = Duration::from_secs(2 * 24 * 60 * 60);
pub const GOV_QUORUM: &str = "0.334000000000000000";
pub const GOV_THRESHOLD: &str = "0.500000000000000000";
pub const GOV_VETO: &str = "0.334000000000000000";

pub const CRISIS_CONSTANT_FEE: u64 = 1000;

pub const SLASHING_MAX_EVIDENCE_AGE: Duration = Duration::from_secs(2 * 60);
pub const SLASHING_SIGNED_BLOCKS_WINDOW: u64 = 100;
pub const SLASHING_MIN_SIGNED_PER_WINDOW: &str = "0.500000000000000000";
pub const SLASHING_DOWNTIME_JAIL_DURATION: Duration = Duration::from_secs(10 * 60);
pub const SLASHING_FRACTION_DOUBLE_SIGN: &str = "0.050000000000000000";
pub const SLASHING_FRACTION_DOWNTIME: &str = "0.010000000000000000";

/// Durations are encoded as nanosecond counts in decimal strings.
fn nanos(duration: Duration) -> String {
    duration.as_nanos().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: &str, amount: u64) -> Self {
        Self { denom: denom.to_string(), amount: amount.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StakingParams {
    pub unbonding_time: String,
    pub max_validators: u16,
    pub max_entries: u16,
    pub bond_denom: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StakingGenesis {
    pub params: StakingParams,
    pub last_total_power: String,
    pub last_validator_power: Option<Vec<Value>>,
    pub validators: Option<Vec<Value>>,
    pub delegations: Option<Vec<Value>>,
    pub unbonding_delegations: Option<Vec<Value>>,
    pub redelegations: Option<Vec<Value>>,
    pub exported: bool,
}

impl StakingGenesis {
    pub fn token_inflation() -> Self {
        Self {
            params: StakingParams {
                unbonding_time: nanos(UNBONDING_TIME),
                max_validators: MAX_VALIDATORS,
                max_entries: MAX_ENTRIES,
                bond_denom: BOND_DENOM.to_string(),
            },
            last_total_power: "0".to_string(),
            last_validator_power: None,
            validators: None,
            delegations: None,
            unbonding_delegations: None,
            redelegations: None,
            exported: false,
        }
    }
}

/// Left empty: total supply is recomputed by the chain on init.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SupplyGenesis {
    pub supply: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DepositParams {
    pub min_deposit: Vec<Coin>,
    pub max_deposit_period: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VotingParams {
    pub voting_period: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TallyParams {
    pub quorum: String,
    pub threshold: String,
    pub veto: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GovGenesis {
    pub starting_proposal_id: String,
    pub deposits: Option<Vec<Value>>,
    pub votes: Option<Vec<Value>>,
    pub proposals: Option<Vec<Value>>,
    pub deposit_params: DepositParams,
    pub voting_params: VotingParams,
    pub tally_params: TallyParams,
}

impl GovGenesis {
    pub fn token_inflation() -> Self {
        Self {
            starting_proposal_id: "1".to_string(),
            deposits: None,
            votes: None,
            proposals: None,
            deposit_params: DepositParams {
                min_deposit: vec![Coin::new(BOND_DENOM, GOV_MIN_DEPOSIT)],
                max_deposit_period: nanos(GOV_DEPOSIT_PERIOD),
            },
            voting_params: VotingParams { voting_period: nanos(GOV_VOTING_PERIOD) },
            tally_params: TallyParams {
                quorum: GOV_QUORUM.to_string(),
                threshold: GOV_THRESHOLD.to_string(),
                veto: GOV_VETO.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CrisisGenesis {
    pub constant_fee: Coin,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlashingParams {
    pub max_evidence_age: String,
    pub signed_blocks_window: String,
    pub min_signed_per_window: String,
    pub downtime_jail_duration: String,
    pub slash_fraction_double_sign: String,
    pub slash_fraction_downtime: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SlashingGenesis {
    pub params: SlashingParams,
    pub signing_infos: BTreeMap<String, Value>,
    pub missed_blocks: BTreeMap<String, Value>,
}

impl SlashingGenesis {
    pub fn token_inflation() -> Self {
        Self {
            params: SlashingParams {
                max_evidence_age: nanos(SLASHING_MAX_EVIDENCE_AGE),
                signed_blocks_window: SLASHING_SIGNED_BLOCKS_WINDOW.to_string(),
                min_signed_per_window: SLASHING_MIN_SIGNED_PER_WINDOW.to_string(),
                downtime_jail_duration: nanos(SLASHING_DOWNTIME_JAIL_DURATION),
                slash_fraction_double_sign: SLASHING_FRACTION_DOUBLE_SIGN.to_string(),
                slash_fraction_downtime: SLASHING_FRACTION_DOWNTIME.to_string(),
            },
            signing_infos: BTreeMap::new(),
            missed_blocks: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GenutilGenesis {
    pub gentx: Option<Vec<Value>>,
}

/// Every section the migration replaces, keyed by its `app_state` name.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSections {
    pub staking: StakingGenesis,
    pub supply: SupplyGenesis,
    pub gov: GovGenesis,
    pub crisis: CrisisGenesis,
    pub slashing: SlashingGenesis,
    pub genutil: GenutilGenesis,
}

impl ModuleSections {
    pub fn token_inflation() -> Self {
        Self {
            staking: StakingGenesis::token_inflation(),
            supply: SupplyGenesis::default(),
            gov: GovGenesis::token_inflation(),
            crisis: CrisisGenesis { constant_fee: Coin::new(BOND_DENOM, CRISIS_CONSTANT_FEE) },
            slashing: SlashingGenesis::token_inflation(),
            genutil: GenutilGenesis::default(),
        }
    }

    /// Sections in the order they are written.
    pub fn into_entries(self) -> serde_json::Result<Vec<(&'static str, Value)>> {
        Ok(vec![
            ("staking", serde_json::to_value(self.staking)?),
            ("supply", serde_json::to_value(self.supply)?),
            ("gov", serde_json::to_value(self.gov)?),
            ("crisis", serde_json::to_value(self.crisis)?),
            ("slashing", serde_json::to_value(self.slashing)?),
            ("genutil", serde_json::to_value(self.genutil)?),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn durations_render_as_nanoseconds() {
        assert_eq!(nanos(UNBONDING_TIME), "1814400000000000");
        assert_eq!(nanos(GOV_DEPOSIT_PERIOD), "172800000000000");
        assert_eq!(nanos(SLASHING_MAX_EVIDENCE_AGE), "120000000000");
        assert_eq!(nanos(SLASHING_DOWNTIME_JAIL_DURATION), "600000000000");
    }

    #[test]
    fn staking_section_shape() {
        let staking = serde_json::to_value(StakingGenesis::token_inflation()).unwrap();
        assert_eq!(
            staking,
            json!({
                "params": {
                    "unbonding_time": "1814400000000000",
                    "max_validators": 100,
                    "max_entries": 7,
                    "bond_denom": "tru",
                },
                "last_total_power": "0",
                "last_validator_power": null,
                "validators": null,
                "delegations": null,
                "unbonding_delegations": null,
                "redelegations": null,
                "exported": false,
            })
        );
    }

    #[test]
    fn slashing_section_keeps_empty_maps() {
        let slashing = serde_json::to_value(SlashingGenesis::token_inflation()).unwrap();
        assert_eq!(slashing["signing_infos"], json!({}));
        assert_eq!(slashing["missed_blocks"], json!({}));
        assert_eq!(slashing["params"]["signed_blocks_window"], json!("100"));
    }

    #[test]
    fn entries_cover_every_replaced_module() {
        let names: Vec<_> = ModuleSections::token_inflation()
            .into_entries()
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["staking", "supply", "gov", "crisis", "slashing", "genutil"]);
    }
}
