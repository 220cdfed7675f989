use serde_json::Value;
use tracing::{debug, info};

use crate::{
    driver::MigrationArgs,
    error::{MigrationError, Result},
    path::{array_mut, object_mut, replace_field, set_field},
    sections::ModuleSections,
};

pub const COMMUNITY_TAX: &str = "0.800000000000000000";

pub const BONDED_POOL_MODULE: &str = "bonded_tokens_pool";

/// Registrar and reward broker accounts, whose balances break the recomputed supply.
pub const DRAINED_ADDRESSES: [&str; 3] = [
    "cosmos1tfpcnjzkthft3ynewqvn7mtdk7guf3knjdqg4d",
    "cosmos1pmp80ys5kplk0gnvmhtxq086xlerkwvcdhk8gx",
    "cosmos1em44grl9ylmmnwawwp5fjn079kesatwp67rxjx",
];

pub const MODULE_ALLOCATION: &str = "0.200000000000000000";

/// `(parent path, key)` of every allocation leaf set to [`MODULE_ALLOCATION`].
pub const ALLOCATION_FIELDS: [(&[&str], &str); 3] = [
    (&["app_state", "account", "params"], "user_growth_allocation"),
    (&["app_state", "account", "params"], "stakeholder_allocation"),
    (&["app_state", "trustaking", "params"], "user_reward_allocation"),
];

const APP_STATE: &[&str] = &["app_state"];

/// Applies the token inflation migration to a genesis document.
///
/// The document is consumed and handed back only when every step succeeded,
/// so a failed run never leaks a half-migrated genesis. `args` carries the
/// chain id and start time; they are stamped by the driver, not here.
pub fn process_genesis(mut genesis: Value, _args: &MigrationArgs) -> Result<Value> {
    set_community_tax(&mut genesis)?;
    remove_validators(&mut genesis)?;

    let drained = drain_accounts(&mut genesis)?;
    info!("Cleared coins of {} account(s)", drained.len());

    replace_module_sections(&mut genesis)?;
    set_allocations(&mut genesis)?;

    Ok(genesis)
}

fn set_community_tax(genesis: &mut Value) -> Result<()> {
    // the rest of distribution is carried over from the export
    set_field(
        genesis,
        &["app_state", "distribution"],
        "community_tax",
        Value::from(COMMUNITY_TAX),
    )?;
    info!("Set community tax to {}", COMMUNITY_TAX);
    Ok(())
}

fn remove_validators(genesis: &mut Value) -> Result<()> {
    let root = genesis
        .as_object_mut()
        .ok_or_else(|| MigrationError::unexpected(&[], "object"))?;
    match root.remove("validators") {
        Some(_) => info!("Removed validator set"),
        None => debug!("No validator set to remove"),
    }
    Ok(())
}

/// Empties the coins of the bonded pool and of [`DRAINED_ADDRESSES`].
///
/// The bonded pool is cleared because delegated shares from the previous
/// staking module were added to it. Returns the cleared addresses.
pub fn drain_accounts(genesis: &mut Value) -> Result<Vec<String>> {
    let accounts = array_mut(genesis, &["app_state", "accounts"])?;

    let mut drained = Vec::new();
    for (i, account) in accounts.iter_mut().enumerate() {
        let index = i.to_string();
        let here = ["app_state", "accounts", index.as_str()];

        let account = account
            .as_object_mut()
            .ok_or_else(|| MigrationError::unexpected(&here, "object"))?;

        let address = match account.get("address") {
            Some(Value::String(address)) => address.clone(),
            Some(_) => return Err(MigrationError::unexpected(&child(&here, "address"), "string")),
            None => return Err(MigrationError::missing(&child(&here, "address"))),
        };
        // ordinary accounts may carry no module name at all
        let is_bonded_pool = match account.get("module_name") {
            Some(Value::String(name)) => name == BONDED_POOL_MODULE,
            Some(Value::Null) | None => false,
            Some(_) => return Err(MigrationError::unexpected(&child(&here, "module_name"), "string")),
        };

        if is_bonded_pool || DRAINED_ADDRESSES.contains(&address.as_str()) {
            account.insert("coins".to_string(), Value::Array(Vec::new()));
            info!("Cleared coins of account {}", address);
            drained.push(address);
        }
    }

    Ok(drained)
}

fn child<'a>(parent: &[&'a str], key: &'a str) -> Vec<&'a str> {
    let mut path = parent.to_vec();
    path.push(key);
    path
}

fn replace_module_sections(genesis: &mut Value) -> Result<()> {
    let app_state = object_mut(genesis, APP_STATE)?;
    for (module, section) in ModuleSections::token_inflation().into_entries()? {
        app_state.insert(module.to_string(), section);
        info!("Replaced {} genesis", module);
    }
    Ok(())
}

fn set_allocations(genesis: &mut Value) -> Result<()> {
    for (parent, key) in ALLOCATION_FIELDS {
        let previous = replace_field(genesis, parent, key, Value::from(MODULE_ALLOCATION))?;
        debug!("{}.{}: {} -> {}", parent.join("."), key, previous, MODULE_ALLOCATION);
    }
    info!("Set module account allocations to {}", MODULE_ALLOCATION);
    Ok(())
}
