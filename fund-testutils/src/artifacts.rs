//! Load compiled contract artifacts and deploy them.
//!
//! Understands forge output (`<Name>.sol/<Name>.json` with
//! `bytecode.object`) and flat truffle/hardhat-style artifacts
//! (`<Name>.json` with a `bytecode` string).

use std::path::{Path, PathBuf};

use alloy::primitives::{Address, Bytes, TxKind};
use alloy::providers::Provider;
use alloy::sol_types::SolValue;

use crate::error::TestkitError;

/// Directory holding compiled artifacts: `FUND_ARTIFACTS_DIR`, or
/// `contracts/out` next to the workspace.
pub fn artifacts_dir() -> PathBuf {
    std::env::var("FUND_ARTIFACTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("../contracts/out"))
}

/// Read compiled contract creation bytecode.
pub fn load_bytecode(dir: &Path, contract_name: &str) -> Result<Vec<u8>, TestkitError> {
    let candidates = [
        dir.join(format!("{contract_name}.sol")).join(format!("{contract_name}.json")),
        dir.join(format!("{contract_name}.json")),
    ];
    let path = candidates.iter().find(|p| p.exists()).ok_or_else(|| {
        TestkitError::Artifact(format!(
            "Cannot find artifact for {contract_name} in {}",
            dir.display()
        ))
    })?;

    let contents = std::fs::read_to_string(path)
        .map_err(|e| TestkitError::Artifact(format!("{}: {e}", path.display())))?;
    let json: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| TestkitError::Artifact(format!("{}: {e}", path.display())))?;

    let bytecode = json["bytecode"]["object"]
        .as_str()
        .or_else(|| json["bytecode"].as_str())
        .ok_or_else(|| {
            TestkitError::Artifact(format!("{}: no bytecode field", path.display()))
        })?;
    let bytecode = bytecode.strip_prefix("0x").unwrap_or(bytecode);
    if bytecode.is_empty() {
        return Err(TestkitError::Artifact(format!(
            "{contract_name} has empty bytecode (abstract contract or interface?)"
        )));
    }
    hex::decode(bytecode)
        .map_err(|e| TestkitError::Artifact(format!("{contract_name}: invalid bytecode hex: {e}")))
}

/// Deploy a contract to the provider, returning its address.
pub async fn deploy_contract(
    provider: &impl Provider,
    bytecode: Vec<u8>,
    constructor_args: Vec<u8>,
) -> Result<Address, TestkitError> {
    let mut deploy_data = bytecode;
    deploy_data.extend_from_slice(&constructor_args);

    let mut tx = alloy::rpc::types::TransactionRequest::default()
        .input(alloy::rpc::types::TransactionInput::both(Bytes::from(deploy_data)));
    tx.to = Some(TxKind::Create);

    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|e| TestkitError::Deploy(format!("deploy tx send failed: {e}")))?;
    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| TestkitError::Deploy(format!("deploy tx receipt failed: {e}")))?;
    receipt
        .contract_address
        .ok_or_else(|| TestkitError::Deploy("no contract address in receipt".into()))
}

/// Deploy a `UserWhitelist` policy approving `approved`.
pub async fn deploy_user_whitelist(
    provider: &impl Provider,
    dir: &Path,
    approved: &[Address],
) -> Result<Address, TestkitError> {
    let bytecode = load_bytecode(dir, "UserWhitelist")?;
    let args = (approved.to_vec(),).abi_encode_params();
    let address = deploy_contract(provider, bytecode, args).await?;
    tracing::info!(%address, approved = approved.len(), "Deployed UserWhitelist");
    Ok(address)
}
