// ═══════════════════════════════════════════════════════════════════
// Aggregation Tests — grouping, ordering, breakdowns, long-tail
// collapse, combining portfolios
// ═══════════════════════════════════════════════════════════════════

use asset_palette_core::models::holding::Holding;
use asset_palette_core::models::portfolio::{Allocation, NamedPortfolioData, PortfolioData};
use asset_palette_core::models::settings::{AssetTypeRank, Settings};
use asset_palette_core::services::aggregation_service::{
    AggregationService, MAX_HOLDING_SLICES, OTHER_HOLDINGS_LABEL, UNRANKED_ASSET_TYPE,
};

fn h(id: &str, asset_type: &str, name: &str, account: &str, value: i64, gain_loss: i64) -> Holding {
    Holding::new(id, asset_type, name, account, value, gain_loss)
}

fn names(slices: &[Allocation]) -> Vec<&str> {
    slices.iter().map(|s| s.name.as_str()).collect()
}

fn mixed_holdings() -> Vec<Holding> {
    vec![
        h("1", "仮想通貨", "ビットコイン", "手入力", 400, 150),
        h("2", "投資信託", "オルカン", "NISA", 900, 200),
        h("3", "国内株式", "トヨタ", "特定", 300, 30),
        h("4", "現金", "預り金", "特定", 1000, 0),
        h("5", "米国株式", "アップル", "NISA", 500, -20),
        h("6", "国内株式", "ソニー", "特定", 600, 60),
        h("7", "不動産", "REIT", "特定", 700, 70),
        h("8", "国内株式", "トヨタ", "NISA", 350, 5),
        h("9", "投資信託", "手入力ファンド", "手入力", 250, 10),
    ]
}

fn sum(slices: &[Allocation]) -> i64 {
    slices.iter().map(|s| s.value).sum()
}

// ═══════════════════════════════════════════════════════════════════
//  Grouping
// ═══════════════════════════════════════════════════════════════════

mod grouping {
    use super::*;

    #[test]
    fn same_name_across_accounts() {
        let data = AggregationService::default().aggregate(&[
            h("a", "国内株式", "X", "A", 100, 10),
            h("b", "国内株式", "X", "B", 200, -5),
        ]);
        assert_eq!(data.aggregated_holdings.len(), 1);
        let x = &data.aggregated_holdings[0];
        assert_eq!(x.name, "X");
        assert_eq!(x.total_value, 300);
        assert_eq!(x.total_gain_loss, 5);
        assert_eq!(x.sub_holdings.len(), 2);
    }

    #[test]
    fn sub_holdings_keep_insertion_order() {
        let forward = AggregationService::default().aggregate(&[
            h("a", "国内株式", "X", "A", 100, 1),
            h("b", "国内株式", "X", "A", 200, 2),
        ]);
        let backward = AggregationService::default().aggregate(&[
            h("b", "国内株式", "X", "A", 200, 2),
            h("a", "国内株式", "X", "A", 100, 1),
        ]);
        let ids = |d: &PortfolioData| -> Vec<String> {
            d.aggregated_holdings[0].sub_holdings.iter().map(|s| s.id.clone()).collect()
        };
        assert_eq!(ids(&forward), vec!["a", "b"]);
        assert_eq!(ids(&backward), vec!["b", "a"]);
        assert_eq!(forward.aggregated_holdings[0].total_value, backward.aggregated_holdings[0].total_value);
    }

    #[test]
    fn group_type_comes_from_first_holding() {
        let data = AggregationService::default().aggregate(&[
            h("a", "投資信託", "X", "A", 100, 0),
            h("b", "国内株式", "X", "B", 100, 0),
        ]);
        assert_eq!(data.aggregated_holdings[0].asset_type, "投資信託");
    }

    #[test]
    fn group_totals_match_sub_holdings() {
        let data = AggregationService::default().aggregate(&mixed_holdings());
        for group in &data.aggregated_holdings {
            assert!(!group.sub_holdings.is_empty());
            assert_eq!(group.total_value, group.sub_holdings.iter().map(|s| s.value).sum::<i64>());
            assert_eq!(group.total_gain_loss, group.sub_holdings.iter().map(|s| s.gain_loss).sum::<i64>());
        }
    }

    #[test]
    fn names_match_exactly() {
        let data = AggregationService::default().aggregate(&[
            h("a", "国内株式", "X", "A", 100, 0),
            h("b", "国内株式", "x", "A", 100, 0),
            h("c", "国内株式", "X ", "A", 100, 0),
        ]);
        assert_eq!(data.aggregated_holdings.len(), 3);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Ordering
// ═══════════════════════════════════════════════════════════════════

mod ordering {
    use super::*;

    #[test]
    fn type_rank_then_value_descending() {
        let data = AggregationService::default().aggregate(&mixed_holdings());
        let order: Vec<&str> = data.aggregated_holdings.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "トヨタ",         // 国内株式 1, 650
                "ソニー",         // 国内株式 1, 600
                "アップル",       // 米国株式 2
                "オルカン",       // 投資信託 5, 900
                "手入力ファンド", // 投資信託 5, 250
                "REIT",           // unranked 90
                "預り金",         // 現金 98
                "ビットコイン",   // 仮想通貨 99
            ]
        );
    }

    #[test]
    fn unranked_types_sit_between_ranked_and_cash() {
        let service = AggregationService::default();
        assert_eq!(service.rank_of("不動産"), UNRANKED_ASSET_TYPE);
        assert!(service.rank_of("外国債券") < UNRANKED_ASSET_TYPE);
        assert!(service.rank_of("現金") > UNRANKED_ASSET_TYPE);
        assert_eq!(service.rank_of("仮想通貨"), 99);
    }

    #[test]
    fn equal_rank_and_value_keep_first_seen_order() {
        let data = AggregationService::default().aggregate(&[
            h("1", "その他資産", "B", "A", 100, 0),
            h("2", "別の資産", "A", "A", 100, 0),
        ]);
        let order: Vec<&str> = data.aggregated_holdings.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn duplicate_rank_entry_keeps_first() {
        let mut settings = Settings::default();
        settings.asset_type_ranks.push(AssetTypeRank::new("国内株式", 50));
        assert_eq!(AggregationService::new(&settings).rank_of("国内株式"), 1);
    }

    #[test]
    fn custom_rank_table() {
        let mut settings = Settings::default();
        settings.asset_type_ranks = vec![AssetTypeRank::new("不動産", 0)];
        let data = AggregationService::new(&settings).aggregate(&mixed_holdings());
        assert_eq!(data.aggregated_holdings[0].name, "REIT");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Breakdowns
// ═══════════════════════════════════════════════════════════════════

mod breakdowns {
    use super::*;

    #[test]
    fn totals_agree_across_projections() {
        let holdings = mixed_holdings();
        let data = AggregationService::default().aggregate(&holdings);
        let raw: i64 = holdings.iter().map(|h| h.value).sum();
        assert_eq!(data.total_value, raw);
        assert_eq!(sum(&data.by_asset_class), raw);
        assert_eq!(sum(&data.by_account), raw);
        assert_eq!(sum(&data.by_holding), raw);
        assert_eq!(data.total_gain_loss, holdings.iter().map(|h| h.gain_loss).sum::<i64>());
    }

    #[test]
    fn breakdown_ties_keep_first_appearance() {
        let data = AggregationService::default().aggregate(&[
            h("1", "b", "n1", "x", 5, 0),
            h("2", "a", "n2", "x", 5, 0),
            h("3", "c", "n3", "x", 7, 0),
        ]);
        assert_eq!(names(&data.by_asset_class), vec!["c", "b", "a"]);
    }

    #[test]
    fn by_asset_class_is_plain_value_order() {
        let data = AggregationService::default().aggregate(&mixed_holdings());
        // 国内株式 1250, 投資信託 1150, 現金 1000, 不動産 700, 米国株式 500, 仮想通貨 400
        assert_eq!(
            names(&data.by_asset_class),
            vec!["国内株式", "投資信託", "現金", "不動産", "米国株式", "仮想通貨"]
        );
        assert_eq!(data.by_asset_class[0].value, 1250);
    }

    #[test]
    fn manual_entries_bucket_by_type_in_by_account() {
        let data = AggregationService::default().aggregate(&[
            h("1", "投資信託", "F", "手入力", 300, 0),
            h("2", "国内株式", "S", "特定", 100, 0),
        ]);
        assert_eq!(
            data.by_account,
            vec![Allocation::new("投資信託", 300), Allocation::new("特定", 100)]
        );
        assert!(data.by_account.iter().all(|a| a.name != "手入力"));
    }

    #[test]
    fn accounts_and_manual_type_buckets() {
        let data = AggregationService::default().aggregate(&mixed_holdings());
        // 特定 2600, NISA 1750, 仮想通貨 400 (manual), 投資信託 250 (manual)
        assert_eq!(
            data.by_account,
            vec![
                Allocation::new("特定", 2600),
                Allocation::new("NISA", 1750),
                Allocation::new("仮想通貨", 400),
                Allocation::new("投資信託", 250),
            ]
        );
    }

    #[test]
    fn by_holding_follows_aggregate_order() {
        let data = AggregationService::default().aggregate(&mixed_holdings());
        let aggregate_names: Vec<&str> = data.aggregated_holdings.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names(&data.by_holding), aggregate_names);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Long tail
// ═══════════════════════════════════════════════════════════════════

mod long_tail {
    use super::*;

    fn many(count: i64) -> Vec<Holding> {
        (1..=count)
            .map(|i| h(&i.to_string(), "国内株式", &format!("銘柄{i}"), "特定", i * 100, 0))
            .collect()
    }

    #[test]
    fn ten_groups_are_not_collapsed() {
        let data = AggregationService::default().aggregate(&many(10));
        assert_eq!(data.by_holding.len(), 10);
        assert!(data.by_holding.iter().all(|s| s.name != OTHER_HOLDINGS_LABEL));
    }

    #[test]
    fn eleven_groups_collapse_into_other() {
        let data = AggregationService::default().aggregate(&many(11));
        assert_eq!(data.by_holding.len(), MAX_HOLDING_SLICES);
        // Sorted by value descending: 1100..300 kept, 200 + 100 collapsed
        assert_eq!(data.by_holding[8], Allocation::new("銘柄3", 300));
        assert_eq!(data.by_holding[9], Allocation::new(OTHER_HOLDINGS_LABEL, 300));
        assert_eq!(sum(&data.by_holding), data.total_value);
    }

    #[test]
    fn collapse_counts_groups_not_holdings() {
        let mut holdings = many(5);
        holdings.extend(many(5)); // same five names again
        let data = AggregationService::default().aggregate(&holdings);
        assert_eq!(data.aggregated_holdings.len(), 5);
        assert_eq!(data.by_holding.len(), 5);
    }

    #[test]
    fn never_more_than_ten_slices() {
        for count in [0, 1, 9, 10, 11, 25, 100] {
            let data = AggregationService::default().aggregate(&many(count));
            assert!(data.by_holding.len() <= MAX_HOLDING_SLICES);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Purity & combining
// ═══════════════════════════════════════════════════════════════════

mod purity {
    use super::*;

    #[test]
    fn empty_input() {
        let data = AggregationService::default().aggregate(&[]);
        assert_eq!(data, PortfolioData::default());
        assert_eq!(data.total_value, 0);
        assert!(data.by_holding.is_empty());
    }

    #[test]
    fn idempotent() {
        let service = AggregationService::default();
        let holdings = mixed_holdings();
        assert_eq!(service.aggregate(&holdings), service.aggregate(&holdings));
    }

    #[test]
    fn raw_holdings_kept_in_input_order() {
        let holdings = mixed_holdings();
        let data = AggregationService::default().aggregate(&holdings);
        assert_eq!(data.holdings, holdings);
        assert_eq!(data.find_holding("5").map(|h| h.name.as_str()), Some("アップル"));
    }

    #[test]
    fn combine_concatenates_in_portfolio_order() {
        let service = AggregationService::default();
        let first = NamedPortfolioData::new(
            "夫",
            service.aggregate(&[h("a1", "国内株式", "X", "A", 100, 10)]),
        );
        let second = NamedPortfolioData::new(
            "妻",
            service.aggregate(&[
                h("b1", "国内株式", "X", "B", 200, -5),
                h("b2", "現金", "預り金", "B", 50, 0),
            ]),
        );

        let combined = service.combine(&[first.clone(), second.clone()]);
        let ids: Vec<&str> = combined.holdings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b1", "b2"]);
        assert_eq!(combined.total_value, 350);
        assert_eq!(combined.aggregated_holdings[0].total_value, 300);
        assert_eq!(combined.aggregated_holdings[0].sub_holdings.len(), 2);

        let mut all = first.data.holdings.clone();
        all.extend(second.data.holdings.clone());
        assert_eq!(combined, service.aggregate(&all));
    }

    #[test]
    fn extreme_amounts_saturate() {
        let data = AggregationService::default().aggregate(&[
            h("1", "現金", "A", "手入力", i64::MAX, i64::MIN),
            h("2", "現金", "A", "手入力", 1, -1),
            h("3", "現金", "B", "手入力", i64::MAX, 0),
        ]);
        assert_eq!(data.total_value, i64::MAX);
        assert_eq!(data.total_gain_loss, i64::MIN);
        assert_eq!(data.aggregated_holdings[0].total_value, i64::MAX);
        assert_eq!(data.by_asset_class, vec![Allocation::new("現金", i64::MAX)]);
    }

    #[test]
    fn combine_nothing() {
        assert_eq!(AggregationService::default().combine(&[]), PortfolioData::default());
    }
}
