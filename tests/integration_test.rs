use token_risk_scanner::*;
use token_risk_scanner::api::AssessmentStatus;
use token_risk_scanner::checks::*;
use token_risk_scanner::discovery::run_discovery;
use token_risk_scanner::discovery::types::*;
use token_risk_scanner::output;
use token_risk_scanner::providers::{MockChainProvider, MockListingProvider, MockTextGenerator};

fn reference_records() -> Vec<TokenAccountRecord> {
    [200u64, 100, 90, 80, 70, 60, 50, 40, 30, 20, 10, 0]
        .iter()
        .enumerate()
        .map(|(i, amount)| TokenAccountRecord::new(format!("ata{}", i), format!("wallet{}", i), *amount))
        .collect()
}

#[test]
fn test_reference_distribution_full_flow() {
    let records = reference_records();
    let mint = MintAccountInfo {
        mint_authority: None,
        freeze_authority: Some("Freezer111".to_string()),
        supply: Some(750),
        decimals: Some(0),
    };

    let distribution = compute_holder_distribution(&records);
    let report = build_risk_report("Mint111", Some(&mint), Some(records.as_slice()), None, None);

    assert_eq!(distribution.total_supply, 750);
    assert_eq!(distribution.top_holders.len(), 10);
    assert!(distribution.top_holders.windows(2).all(|w| w[0].amount >= w[1].amount));
    assert!(distribution.top_holders.iter().all(|h| h.amount > 0));

    let expected = 740.0 / 750.0 * 100.0;
    assert!((report.top_holder_percentage.unwrap() - expected).abs() < 1e-9);
    assert_eq!(
        report.authorities,
        Some(AuthorityFlags {
            mint_authority_disabled: true,
            freeze_authority_disabled: false,
        })
    );
    assert_eq!(report.liquidity.lp_address, None);
    assert_eq!(report.liquidity.lp_burned, None);
    assert_eq!(report.liquidity.pooled_tokens, None);
    assert_eq!(report.liquidity.pooled_sol, None);
    assert_eq!(report.liquidity.open_trading, None);
}

#[tokio::test]
async fn test_assess_rug_shaped_token() {
    // one wallet holds nearly everything, authorities live, LP not burned
    let mut records = vec![TokenAccountRecord::new("whale_ata", "whale", 9_000_000)];
    records.extend((0..50).map(|i| TokenAccountRecord::new(format!("ata{}", i), format!("w{}", i), 1_000)));

    let provider = MockChainProvider::new("test")
        .with_mint(
            "rug",
            MintAccountInfo {
                mint_authority: Some("Dev111".to_string()),
                freeze_authority: Some("Dev111".to_string()),
                supply: Some(9_050_000),
                decimals: Some(6),
            },
        )
        .with_token_accounts("rug", records)
        .with_largest(
            "rug",
            vec![
                LargestAccount {
                    address: "whale_ata".to_string(),
                    owner: Some("whale".to_string()),
                    amount: 9_000_000,
                },
                LargestAccount {
                    address: "vault".to_string(),
                    owner: Some(RAYDIUM_AMM_V4_AUTHORITY.to_string()),
                    amount: 1_000,
                },
            ],
        )
        .with_lp_account(
            "vault",
            LpAccountData {
                supply: Some(10_000),
                token_amount: Some(1_000),
                sol_amount: Some(2_000_000_000),
                state: Some("initialized".to_string()),
            },
        );

    let response = assess(AssessRequest::new("rug"), &provider).await;

    assert_eq!(response.status, AssessmentStatus::Ok);
    assert!(response.report.top_holder_percentage.unwrap() > 99.0);
    assert_eq!(response.report.liquidity.lp_burned, Some(false));
    assert_eq!(response.warnings.len(), 4);
}

#[tokio::test]
async fn test_scan_pipeline_writes_outputs() {
    let boosts: Vec<DexBoost> = ["quiet", "busy", "medium", "unlisted"]
        .iter()
        .map(|address| DexBoost {
            url: None,
            chain_id: "solana".to_string(),
            token_address: address.to_string(),
            description: None,
            icon: None,
            links: None,
            total_amount: Some(50.0),
            amount: Some(10.0),
        })
        .collect();
    let pair = |address: &str, volume: f64| DexPair {
        chain_id: "solana".to_string(),
        pair_address: format!("{}-pair", address),
        base_token: PairToken {
            address: address.to_string(),
            ..Default::default()
        },
        volume: Some(Windowed {
            h24: Some(volume),
            ..Default::default()
        }),
        ..Default::default()
    };
    let listings = MockListingProvider::new(boosts)
        .with_pairs("quiet", vec![pair("quiet", 5.0)])
        .with_pairs("busy", vec![pair("busy", 5_000.0)])
        .with_pairs("medium", vec![pair("medium", 500.0)]);

    let result = run_discovery(&listings, 3).await.unwrap();
    let top: Vec<&str> = result.top.iter().map(|t| t.address.as_str()).collect();
    assert_eq!(top, vec!["busy", "medium", "quiet"]);

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("tokens");
    output::save_listings_json(&dir, &result.all).await.unwrap();

    let generator = MockTextGenerator::new("address,volume\nbusy,5000");
    let csv = output::format_csv_with_llm(&generator, &result.top).await.unwrap();
    let csv_path = output::save_csv(&dir, 3, &csv).await.unwrap();

    assert!(dir.join(output::LISTINGS_FILE).exists());
    assert_eq!(std::fs::read_to_string(csv_path).unwrap(), "address,volume\nbusy,5000");
}
