/// Integration tests for the admin command layer
/// Runs chat lines end to end against an in-memory host
use econadmin::commands::AdminProcessor;
use econadmin::config::AdminConfig;
use econadmin::host::{EconomyHost, MemoryHost};

const GOLD: i64 = 1;
const OLD_CREDIT: i64 = 2;
const SUPER_CREDIT: i64 = 3;
const TEST_CURRENCY: i64 = 4;

const ALICE: i64 = 100;
const BOB: i64 = 101;
const BOB_ALT: i64 = 102;

fn world() -> MemoryHost {
    MemoryHost::new()
        .with_currency(GOLD, "Gold")
        .with_currency(OLD_CREDIT, "Old Credit")
        .with_currency(SUPER_CREDIT, "SuperCredit")
        .with_currency(TEST_CURRENCY, "Old Test Currency")
        .with_account(ALICE, "Alice")
        .with_account(BOB, "Bob Smith")
        .with_account(BOB_ALT, "Bob Smith Alt")
        .with_balance(ALICE, GOLD, 100.0)
        .with_balance(ALICE, OLD_CREDIT, 12.5)
        .with_balance(BOB, OLD_CREDIT, 7.5)
        .with_balance(BOB, SUPER_CREDIT, 3.0)
        .with_balance(BOB_ALT, TEST_CURRENCY, 0.0)
}

fn processor() -> AdminProcessor {
    AdminProcessor::new(AdminConfig::default())
}

fn run(host: &mut MemoryHost, line: &str) -> Vec<String> {
    processor().handle_line(host, line).unwrap()
}

fn contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|line| line.contains(needle))
}

#[test]
fn test_adjust_by_name_and_quoted_account() {
    let mut host = world();
    let lines = run(&mut host, r#"/ea-adjust "Bob Smith" Gold 250"#);

    assert!(contains(&lines, "[EA] Added 250.00 Gold"), "{:?}", lines);
    assert!(contains(&lines, "Account: Bob Smith | Before: 0.00 → After: 250.00"));
    assert_eq!(host.balance(BOB, GOLD).unwrap(), 250.0);
}

#[test]
fn test_adjust_negative_reports_removal() {
    let mut host = world();
    let lines = run(&mut host, "/ea-adjust alice gold -40");

    assert!(contains(&lines, "Removed 40.00 Gold"), "{:?}", lines);
    assert_eq!(host.balance(ALICE, GOLD).unwrap(), 60.0);
}

#[test]
fn test_adjust_by_numeric_ids() {
    let mut host = world();
    run(&mut host, "/ea-adjust 101 3 1.5");
    assert_eq!(host.balance(BOB, SUPER_CREDIT).unwrap(), 4.5);
}

#[test]
fn test_adjust_ambiguous_account_changes_nothing() {
    let mut host = world();
    let lines = run(&mut host, "/ea-adjust bob Gold 10");

    assert!(contains(&lines, "'bob' matches 2 accounts:"), "{:?}", lines);
    assert!(contains(&lines, "  • Bob Smith (id 101)"));
    assert!(contains(&lines, "  • Bob Smith Alt (id 102)"));
    assert!(contains(&lines, "Be more specific or use the id."));
    assert_eq!(host.balance(BOB, GOLD).unwrap(), 0.0);
    assert_eq!(host.balance(BOB_ALT, GOLD).unwrap(), 0.0);
}

#[test]
fn test_adjust_unknown_currency_and_account() {
    let mut host = world();

    let lines = run(&mut host, "/ea-adjust Alice Platinum 5");
    assert!(contains(&lines, "Currency 'Platinum' not found."));
    assert!(contains(&lines, "Use /ea-currencies to see all currencies."));

    let lines = run(&mut host, "/ea-adjust Zed Gold 5");
    assert!(contains(&lines, "Account 'Zed' not found."));
    assert!(contains(&lines, "Use /ea-accounts to search for accounts."));

    // Numeric tokens never fall back to name matching
    let lines = run(&mut host, "/ea-adjust 999 Gold 5");
    assert!(contains(&lines, "Account '999' not found."));
}

#[test]
fn test_adjust_and_wipe_require_a_currency() {
    let config = AdminConfig {
        global_currency: Some("Gold".to_string()),
        ..AdminConfig::default()
    };
    let processor = AdminProcessor::new(config);
    let mut host = world();

    let lines = processor.handle_line(&mut host, "/ea-adjust Alice 5").unwrap();
    assert_eq!(lines, vec!["[EA] Usage: /ea-adjust <account> <currency> <amount>"]);
    let lines = processor.handle_line(&mut host, "/ea-wipe Alice").unwrap();
    assert_eq!(lines, vec!["[EA] Usage: /ea-wipe <account> <currency>"]);
    assert_eq!(host.balance(ALICE, GOLD).unwrap(), 100.0);
}

const TREASURY: i64 = 900;

fn gc_world() -> MemoryHost {
    world()
        .with_account(TREASURY, "Gold - Treasury")
        .with_balance(TREASURY, GOLD, 1000.0)
}

fn gc_processor(gift: u64) -> AdminProcessor {
    AdminProcessor::new(AdminConfig {
        global_currency: Some("gold".to_string()),
        new_player_gift: gift,
        ..AdminConfig::default()
    })
}

#[test]
fn test_gc_status_reports_currency_and_treasury() {
    let mut host = gc_world();
    let lines = gc_processor(500).handle_line(&mut host, "/ea-gc status").unwrap();
    assert_eq!(
        lines,
        vec![
            "[EA] === Global Currency Status ===",
            "[EA] Currency Name:   gold",
            "[EA] Currency:        Found",
            "[EA] Treasury:        Found | Balance: 1000.00 (gold - Treasury)",
            "[EA] New Player Gift: 500",
        ]
    );

    let mut bare = world();
    let lines = gc_processor(0).handle_line(&mut bare, "/ea-gc status").unwrap();
    assert!(contains(&lines, "Treasury:        Not found"), "{:?}", lines);
    assert!(contains(&lines, "New Player Gift: Disabled"));

    let lines = run(&mut bare, "/ea-gc status");
    assert!(contains(&lines, "No global currency configured."));
}

#[test]
fn test_gc_status_with_missing_currency() {
    let mut host = gc_world();
    let processor = AdminProcessor::new(AdminConfig {
        global_currency: Some("Platinum".to_string()),
        treasury_account: Some("Gold - Treasury".to_string()),
        ..AdminConfig::default()
    });
    let lines = processor.handle_line(&mut host, "/ea-gc status").unwrap();
    assert!(contains(&lines, "Currency:        Not found"), "{:?}", lines);
    assert!(contains(&lines, "Treasury:        Found | Balance: N/A"));
}

#[test]
fn test_gc_gift_uses_explicit_or_configured_amount() {
    let mut host = gc_world();
    let processor = gc_processor(500);

    let lines = processor.handle_line(&mut host, "/ea-gc gift alice").unwrap();
    assert_eq!(lines, vec!["[EA] Gifted 500.00 Gold to 'Alice'"]);
    assert_eq!(host.balance(ALICE, GOLD).unwrap(), 600.0);

    processor
        .handle_line(&mut host, "/ea-gc gift \"Bob Smith Alt\" 25")
        .unwrap();
    assert_eq!(host.balance(BOB_ALT, GOLD).unwrap(), 25.0);

    // Non-positive amounts fall back to the configured gift
    processor.handle_line(&mut host, "/ea-gc gift 102 -3").unwrap();
    assert_eq!(host.balance(BOB_ALT, GOLD).unwrap(), 525.0);
}

#[test]
fn test_gc_gift_failures_change_nothing() {
    let mut host = gc_world();

    let lines = gc_processor(0).handle_line(&mut host, "/ea-gc gift Alice").unwrap();
    assert!(contains(&lines, "No amount given and new_player_gift is 0."), "{:?}", lines);

    let lines = gc_processor(10).handle_line(&mut host, "/ea-gc gift bob").unwrap();
    assert!(contains(&lines, "'bob' matches 2 accounts:"), "{:?}", lines);

    let lines = run(&mut host, "/ea-gc gift Alice 5");
    assert!(contains(&lines, "Global currency is not configured."));

    let lines = gc_processor(10).handle_line(&mut host, "/ea-gc gift").unwrap();
    assert_eq!(lines, vec!["[EA] Usage: /ea-gc gift <account> [amount]"]);

    assert_eq!(host.balance(ALICE, GOLD).unwrap(), 100.0);
    assert_eq!(host.balance(BOB, GOLD).unwrap(), 0.0);
}

#[test]
fn test_gc_mint_into_treasury() {
    let mut host = gc_world();
    let lines = gc_processor(0).handle_line(&mut host, "/ea-gc mint 250").unwrap();
    assert_eq!(
        lines,
        vec![
            "[EA] Minted 250.00 Gold into 'gold - Treasury'",
            "[EA] Treasury balance: 1000.00 → 1250.00",
        ]
    );
    assert_eq!(host.balance(TREASURY, GOLD).unwrap(), 1250.0);

    let lines = gc_processor(0).handle_line(&mut host, "/ea-gc mint 0").unwrap();
    assert!(contains(&lines, "Usage: /ea-gc mint <amount>"));
}

#[test]
fn test_gc_mint_needs_treasury_by_exact_name() {
    // "Gold - Treasury Annex" contains the treasury name but is not it
    let mut host = world().with_account(901, "Gold - Treasury Annex");
    let lines = gc_processor(0).handle_line(&mut host, "/ea-gc mint 5").unwrap();
    assert_eq!(lines, vec!["[EA] Treasury 'gold - Treasury' not found."]);
    assert_eq!(host.balance(901, GOLD).unwrap(), 0.0);
}

#[test]
fn test_invalid_amount_is_reported() {
    let mut host = world();
    let lines = run(&mut host, "/ea-adjust Alice Gold lots");
    assert!(contains(&lines, "'lots' is not a valid amount."));
    assert!(contains(&lines, "Usage: /ea-adjust"));
}

#[test]
fn test_wipe_removes_whole_balance() {
    let mut host = world();
    let lines = run(&mut host, "/ea-wipe Alice \"Old Credit\"");

    assert!(contains(&lines, "Wiped 12.50 Old Credit from 'Alice'"), "{:?}", lines);
    assert_eq!(host.balance(ALICE, OLD_CREDIT).unwrap(), 0.0);

    let lines = run(&mut host, "/ea-wipe Alice \"Old Credit\"");
    assert!(contains(&lines, "Account has no Old Credit to remove."));
}

#[test]
fn test_preview_lists_matches_without_changes() {
    let mut host = world();
    let lines = run(&mut host, "/ea-preview *Credit");

    assert_eq!(lines[0], "[EA] Pattern '*Credit' matches 2 currencies:");
    assert_eq!(lines[1], "  • Old Credit");
    assert_eq!(lines[2], "  • SuperCredit");
    assert_eq!(host.balance(ALICE, OLD_CREDIT).unwrap(), 12.5);
}

#[test]
fn test_preview_no_match_shows_tip() {
    let mut host = world();
    let lines = run(&mut host, "/ea-preview *Diamond*");
    assert!(contains(&lines, "No currencies match pattern: '*Diamond*'"));
    assert!(contains(&lines, "Tip: Use * wildcard"));
}

#[test]
fn test_preview_caps_output() {
    let mut host = (0..35).fold(MemoryHost::new(), |host, i| {
        host.with_currency(i, &format!("Token {}", i))
    });
    let lines = run(&mut host, "/ea-preview Token*");

    assert_eq!(lines[0], "[EA] Pattern 'Token*' matches 35 currencies:");
    assert_eq!(lines.len(), 1 + 30 + 1);
    assert_eq!(lines.last().unwrap(), "  ... and 5 more");
}

#[test]
fn test_purge_removes_positive_balances_everywhere() {
    let mut host = world();
    let lines = run(&mut host, "/ea-purge *Credit");

    assert!(contains(&lines, "⚠ PURGING 2 currencies matching '*Credit'..."), "{:?}", lines);
    assert!(contains(&lines, "  • Old Credit: 20.00 removed from 2 accounts"));
    assert!(contains(&lines, "  • SuperCredit: 3.00 removed from 1 accounts"));
    assert!(contains(&lines, "✓ Complete: 2 currencies purged"));
    assert!(contains(&lines, "Total removed: 23.00 from 3 account operations"));

    assert_eq!(host.balance(ALICE, OLD_CREDIT).unwrap(), 0.0);
    assert_eq!(host.balance(BOB, OLD_CREDIT).unwrap(), 0.0);
    assert_eq!(host.balance(BOB, SUPER_CREDIT).unwrap(), 0.0);
    assert_eq!(host.balance(ALICE, GOLD).unwrap(), 100.0);
}

#[test]
fn test_purge_plain_name_is_exact_only() {
    let mut host = world();
    let lines = run(&mut host, "/ea-purge credit");
    assert!(contains(&lines, "No currencies match pattern: 'credit'"));

    let lines = run(&mut host, "/ea-purge \"old credit\"");
    assert!(contains(&lines, "  • Old Credit: 20.00 removed from 2 accounts"));
    assert_eq!(host.balance(BOB, SUPER_CREDIT).unwrap(), 3.0);
}

#[test]
fn test_purge_without_balances() {
    let mut host = world();
    let lines = run(&mut host, "/ea-purge *Test*");
    assert!(contains(&lines, "No balances found to remove."), "{:?}", lines);
}

#[test]
fn test_balance_sorted_descending() {
    let mut host = world()
        .with_balance(ALICE, SUPER_CREDIT, 50.0)
        .with_balance(ALICE, TEST_CURRENCY, -3.0);
    let lines = run(&mut host, "/ea-balance Alice");

    assert_eq!(lines[0], "[EA] Account: Alice");
    assert_eq!(lines[1], "[EA] Holdings (3 currencies):");
    assert_eq!(lines[2], "  • 100.00 Gold");
    assert_eq!(lines[3], "  • 50.00 SuperCredit");
    assert_eq!(lines[4], "  • 12.50 Old Credit");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_balance_empty_account() {
    let mut host = world();
    let lines = run(&mut host, "/ea-balance Bob Smith Alt");
    assert!(contains(&lines, "Account 'Bob Smith Alt' has no currency."), "{:?}", lines);
}

#[test]
fn test_account_and_currency_listing() {
    let mut host = world();

    let lines = run(&mut host, "/ea-accounts bob");
    assert_eq!(lines[0], "[EA] Found 2 account(s):");
    assert_eq!(&lines[1..], &["  • Bob Smith", "  • Bob Smith Alt"]);

    let lines = run(&mut host, "/ea-accounts nobody");
    assert_eq!(lines, vec!["[EA] No matching accounts found."]);

    let lines = run(&mut host, "/ea-currencies");
    assert_eq!(lines[0], "[EA] Total: 4 currencies");
    assert_eq!(lines.len(), 5);

    let lines = run(&mut host, "/ea-currencies credit");
    assert_eq!(lines[0], "[EA] Total: 2 currencies");
}

#[test]
fn test_custom_prefix_and_unknown_command() {
    let mut host = world();
    let config = AdminConfig {
        message_prefix: "[Bank]".to_string(),
        ..AdminConfig::default()
    };
    let lines = AdminProcessor::new(config)
        .handle_line(&mut host, "/ea-frobnicate")
        .unwrap();
    assert_eq!(lines[0], "[Bank] Unknown command 'ea-frobnicate'.");
    assert_eq!(lines[1], "[Bank] Use /ea-help to see all commands.");
}

#[test]
fn test_help_lists_every_command() {
    let mut host = world();
    let lines = run(&mut host, "ea-help");
    for verb in [
        "/ea-accounts",
        "/ea-currencies",
        "/ea-adjust",
        "/ea-wipe",
        "/ea-preview",
        "/ea-purge",
        "/ea-balance",
        "/ea-gc status",
        "/ea-gc gift",
        "/ea-gc mint",
    ] {
        assert!(contains(&lines, verb), "help is missing {}", verb);
    }
}
