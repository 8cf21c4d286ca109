use crate::data::types::ChainConfig;

/// Get a chain configuration preset by name.
pub fn get_chain_config(name: &str) -> Option<ChainConfig> {
    match name.to_lowercase().as_str() {
        "celo" | "mainnet" => Some(ChainConfig {
            name: "Celo Mainnet".to_string(),
            chain_id: 42220,
            rpc_url: "https://forno.celo.org".to_string(),
            native_symbol: "CELO".to_string(),
            stable_symbol: "cUSD".to_string(),
            explorer_url: Some("https://celoscan.io".to_string()),
        }),
        "alfajores" | "testnet" => Some(ChainConfig {
            name: "Alfajores Testnet".to_string(),
            chain_id: 44787,
            rpc_url: "https://alfajores-forno.celo-testnet.org".to_string(),
            native_symbol: "CELO".to_string(),
            stable_symbol: "cUSD".to_string(),
            explorer_url: Some("https://alfajores.celoscan.io".to_string()),
        }),
        "localhost" | "local" | "devchain" => Some(ChainConfig {
            name: "Localhost".to_string(),
            chain_id: 1337,
            rpc_url: "http://127.0.0.1:8545".to_string(),
            native_symbol: "CELO".to_string(),
            stable_symbol: "cUSD".to_string(),
            explorer_url: None,
        }),
        _ => None,
    }
}

/// Find the preset matching a chain id reported by the node.
pub fn get_chain_config_by_id(chain_id: u64) -> Option<ChainConfig> {
    supported_chains()
        .into_iter()
        .filter_map(get_chain_config)
        .find(|c| c.chain_id == chain_id)
}

/// Return a list of all supported chain names.
pub fn supported_chains() -> Vec<&'static str> {
    vec!["celo", "alfajores", "localhost"]
}

/// Link to a transaction on the chain's block explorer, if it has one.
pub fn tx_url(config: &ChainConfig, tx_hash: &str) -> Option<String> {
    config
        .explorer_url
        .as_ref()
        .map(|base| format!("{base}/tx/{tx_hash}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celo_config() {
        let config = get_chain_config("celo").unwrap();
        assert_eq!(config.chain_id, 42220);
        assert_eq!(config.native_symbol, "CELO");
        assert_eq!(config.stable_symbol, "cUSD");
    }

    #[test]
    fn test_alfajores_config() {
        let config = get_chain_config("alfajores").unwrap();
        assert_eq!(config.chain_id, 44787);
        assert_eq!(config.rpc_url, "https://alfajores-forno.celo-testnet.org");
    }

    #[test]
    fn test_aliases_case_insensitive() {
        assert!(get_chain_config("Celo").is_some());
        assert!(get_chain_config("TESTNET").is_some());
        assert!(get_chain_config("local").is_some());
    }

    #[test]
    fn test_localhost_has_no_explorer() {
        let config = get_chain_config("localhost").unwrap();
        assert!(config.explorer_url.is_none());
        assert!(tx_url(&config, "0xabc").is_none());
    }

    #[test]
    fn test_unknown_chain() {
        assert!(get_chain_config("ethereum").is_none());
    }

    #[test]
    fn test_lookup_by_id() {
        let config = get_chain_config_by_id(44787).unwrap();
        assert_eq!(config.name, "Alfajores Testnet");
        assert!(get_chain_config_by_id(1).is_none());
    }

    #[test]
    fn test_tx_url() {
        let config = get_chain_config("celo").unwrap();
        assert_eq!(
            tx_url(&config, "0xabc").as_deref(),
            Some("https://celoscan.io/tx/0xabc")
        );
    }
}
