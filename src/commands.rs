//! Admin command parsing and execution.
//!
//! Turns chat lines such as `/ea-adjust "Player One" Gold -500` into
//! [`AdminCommand`] values and runs them against an [`EconomyHost`]. Every
//! command produces the lines that would be sent back to the admin; nothing
//! here prints or talks to the network.
//!
//! Account and currency arguments go through [`resolve`], so admins may type
//! an id, an exact name, or any unique fragment of a name. Preview and purge
//! select currencies with [`select_by_pattern`].
//!
//! The `ea-gc` family works on the configured global currency and its
//! treasury account, both looked up by exact name.

use log::{debug, info};

use crate::config::AdminConfig;
use crate::entity::{usable_name, Entity};
use crate::error::EconAdminError;
use crate::host::EconomyHost;
use crate::logutil::{escape_log, name_list, AUDIT_TARGET};
use crate::matcher::{contains_ignore_case, select_by_pattern};
use crate::resolver::{find_by_name, format_candidates, normalize_token, resolve, Resolution};

const ACCOUNTS_USAGE: &str = "/ea-accounts [search]";
const CURRENCIES_USAGE: &str = "/ea-currencies [filter]";
const ADJUST_USAGE: &str = "/ea-adjust <account> <currency> <amount>";
const WIPE_USAGE: &str = "/ea-wipe <account> <currency>";
const PREVIEW_USAGE: &str = "/ea-preview <pattern>";
const PURGE_USAGE: &str = "/ea-purge <pattern>";
const BALANCE_USAGE: &str = "/ea-balance <account>";
const GC_STATUS_USAGE: &str = "/ea-gc status";
const GC_GIFT_USAGE: &str = "/ea-gc gift <account> [amount]";
const GC_MINT_USAGE: &str = "/ea-gc mint <amount>  (must be greater than 0)";

/// A parsed admin command
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    /// EA-ACCOUNTS [search] - list accounts whose name contains search
    Accounts { search: String },
    /// EA-CURRENCIES [filter] - list currencies whose name contains filter
    Currencies { filter: String },
    /// EA-ADJUST account currency amount - add or remove an amount
    Adjust {
        account: String,
        currency: String,
        amount: f64,
    },
    /// EA-WIPE account currency - remove the whole balance of one currency
    Wipe { account: String, currency: String },
    /// EA-PREVIEW pattern - show currencies a purge would touch
    Preview { pattern: String },
    /// EA-PURGE pattern - remove matching currencies from every account
    Purge { pattern: String },
    /// EA-BALANCE account - list an account's holdings
    Balance { account: String },
    /// EA-GC STATUS - global currency config and treasury balance
    GcStatus,
    /// EA-GC GIFT account [amount] - give global currency, defaulting to the
    /// configured gift
    GcGift {
        account: String,
        amount: Option<f64>,
    },
    /// EA-GC MINT amount - add global currency to the treasury
    GcMint { amount: f64 },
    /// EA-HELP
    Help,
}

impl AdminCommand {
    /// Parse a chat line. The leading `/` is optional and the verb is
    /// case-insensitive.
    pub fn parse(line: &str) -> Result<Self, EconAdminError> {
        let tokens = tokenize(line);
        let Some((verb, args)) = tokens.split_first() else {
            return Err(EconAdminError::Usage("/ea-help".to_string()));
        };
        let verb = verb.trim_start_matches('/').to_ascii_lowercase();
        let rest = || normalize_token(&args.join(" ")).to_string();

        match verb.as_str() {
            "ea-accounts" => Ok(AdminCommand::Accounts { search: rest() }),
            "ea-currencies" => Ok(AdminCommand::Currencies { filter: rest() }),
            "ea-adjust" => match args {
                [account, currency, amount] => Ok(AdminCommand::Adjust {
                    account: normalize_token(account).to_string(),
                    currency: normalize_token(currency).to_string(),
                    amount: parse_amount(amount)?,
                }),
                _ => Err(EconAdminError::Usage(ADJUST_USAGE.to_string())),
            },
            "ea-wipe" => match args {
                [account, currency] => Ok(AdminCommand::Wipe {
                    account: normalize_token(account).to_string(),
                    currency: normalize_token(currency).to_string(),
                }),
                _ => Err(EconAdminError::Usage(WIPE_USAGE.to_string())),
            },
            "ea-gc" | "eagc" => parse_gc(args),
            "ea-preview" | "ea-purge" => {
                let pattern = rest();
                if pattern.is_empty() {
                    let usage = if verb == "ea-preview" {
                        PREVIEW_USAGE
                    } else {
                        PURGE_USAGE
                    };
                    return Err(EconAdminError::Usage(usage.to_string()));
                }
                if verb == "ea-preview" {
                    Ok(AdminCommand::Preview { pattern })
                } else {
                    Ok(AdminCommand::Purge { pattern })
                }
            }
            "ea-balance" => {
                let account = rest();
                if account.is_empty() {
                    return Err(EconAdminError::Usage(BALANCE_USAGE.to_string()));
                }
                Ok(AdminCommand::Balance { account })
            }
            "ea-help" => Ok(AdminCommand::Help),
            _ => Err(EconAdminError::UnknownCommand(verb.clone())),
        }
    }
}

/// Split a chat line on whitespace, keeping double-quoted runs together.
///
/// Quote characters stay in the token; [`normalize_token`] strips them later.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Parse the `ea-gc` subcommands. Bad amounts are reported with the
/// subcommand's own usage line.
fn parse_gc(args: &[String]) -> Result<AdminCommand, EconAdminError> {
    let usage = |text: &str| EconAdminError::Usage(text.to_string());
    let Some((sub, args)) = args.split_first() else {
        return Err(usage(GC_STATUS_USAGE));
    };

    match sub.to_ascii_lowercase().as_str() {
        "status" => Ok(AdminCommand::GcStatus),
        "gift" => {
            let (account, amount) = match args {
                [account] => (account, None),
                [account, amount] => (
                    account,
                    Some(parse_amount(amount).map_err(|_| usage(GC_GIFT_USAGE))?),
                ),
                _ => return Err(usage(GC_GIFT_USAGE)),
            };
            let account = normalize_token(account).to_string();
            if account.is_empty() {
                return Err(usage(GC_GIFT_USAGE));
            }
            Ok(AdminCommand::GcGift { account, amount })
        }
        "mint" => match args {
            [amount] => match parse_amount(amount) {
                Ok(amount) if amount > 0.0 => Ok(AdminCommand::GcMint { amount }),
                _ => Err(usage(GC_MINT_USAGE)),
            },
            _ => Err(usage(GC_MINT_USAGE)),
        },
        _ => Err(usage(GC_STATUS_USAGE)),
    }
}

fn parse_amount(raw: &str) -> Result<f64, EconAdminError> {
    match normalize_token(raw).parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(EconAdminError::InvalidAmount(raw.to_string())),
    }
}

/// Lines collected for the admin, each status line carrying the prefix.
struct Reply<'p> {
    prefix: &'p str,
    lines: Vec<String>,
}

impl<'p> Reply<'p> {
    fn new(prefix: &'p str) -> Self {
        Self {
            prefix,
            lines: Vec::new(),
        }
    }

    fn say(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("{} {}", self.prefix, text.as_ref()));
    }

    fn item(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("  • {}", text.as_ref()));
    }

    fn more(&mut self, shown: usize, total: usize) {
        if total > shown {
            self.lines.push(format!("  ... and {} more", total - shown));
        }
    }
}

/// Executes admin commands against a host
#[derive(Debug, Clone, Default)]
pub struct AdminProcessor {
    config: AdminConfig,
}

impl AdminProcessor {
    pub fn new(config: AdminConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Parse and run one chat line.
    ///
    /// Usage mistakes become reply lines; only host faults are returned as
    /// errors.
    pub fn handle_line<H: EconomyHost + ?Sized>(
        &self,
        host: &mut H,
        line: &str,
    ) -> Result<Vec<String>, EconAdminError> {
        debug!("admin command: {}", escape_log(line));
        let mut reply = Reply::new(&self.config.message_prefix);
        match AdminCommand::parse(line) {
            Ok(command) => return self.execute(host, command),
            Err(EconAdminError::Usage(usage)) => reply.say(format!("Usage: {}", usage)),
            Err(EconAdminError::UnknownCommand(verb)) => {
                reply.say(format!("Unknown command '{}'.", verb));
                reply.say("Use /ea-help to see all commands.");
            }
            Err(EconAdminError::InvalidAmount(raw)) => {
                reply.say(format!("'{}' is not a valid amount.", raw));
                reply.say(format!("Usage: {}", ADJUST_USAGE));
            }
            Err(other) => return Err(other),
        }
        Ok(reply.lines)
    }

    /// Run a parsed command.
    pub fn execute<H: EconomyHost + ?Sized>(
        &self,
        host: &mut H,
        command: AdminCommand,
    ) -> Result<Vec<String>, EconAdminError> {
        let mut reply = Reply::new(&self.config.message_prefix);
        match command {
            AdminCommand::Accounts { search } => self.list_accounts(&*host, &search, &mut reply),
            AdminCommand::Currencies { filter } => {
                self.list_currencies(&*host, &filter, &mut reply)
            }
            AdminCommand::Adjust {
                account,
                currency,
                amount,
            } => self.adjust(host, &account, &currency, amount, &mut reply)?,
            AdminCommand::Wipe { account, currency } => {
                self.wipe(host, &account, &currency, &mut reply)?
            }
            AdminCommand::Preview { pattern } => self.preview(&*host, &pattern, &mut reply),
            AdminCommand::Purge { pattern } => self.purge(host, &pattern, &mut reply)?,
            AdminCommand::Balance { account } => self.balance(&*host, &account, &mut reply)?,
            AdminCommand::GcStatus => self.gc_status(&*host, &mut reply)?,
            AdminCommand::GcGift { account, amount } => {
                self.gc_gift(host, &account, amount, &mut reply)?
            }
            AdminCommand::GcMint { amount } => self.gc_mint(host, amount, &mut reply)?,
            AdminCommand::Help => help(&mut reply),
        }
        Ok(reply.lines)
    }

    fn list_accounts<H: EconomyHost + ?Sized>(&self, host: &H, search: &str, reply: &mut Reply) {
        let accounts = host.accounts();
        let names: Vec<&str> = accounts
            .iter()
            .filter_map(|account| usable_name(account))
            .filter(|name| search.is_empty() || contains_ignore_case(name, search))
            .collect();

        if names.is_empty() {
            reply.say("No matching accounts found.");
            return;
        }

        reply.say(format!("Found {} account(s):", names.len()));
        for name in names.iter().take(self.config.list_limit) {
            reply.item(name);
        }
        reply.more(self.config.list_limit, names.len());
    }

    fn list_currencies<H: EconomyHost + ?Sized>(&self, host: &H, filter: &str, reply: &mut Reply) {
        let currencies = host.currencies();
        let names: Vec<&str> = currencies
            .iter()
            .filter_map(|currency| usable_name(currency))
            .filter(|name| filter.is_empty() || contains_ignore_case(name, filter))
            .collect();

        if names.is_empty() {
            reply.say("No currencies found.");
            return;
        }

        reply.say(format!("Total: {} currencies", names.len()));
        for name in names.iter().take(self.config.list_limit) {
            reply.item(name);
        }
        reply.more(self.config.list_limit, names.len());
    }

    fn adjust<H: EconomyHost + ?Sized>(
        &self,
        host: &mut H,
        account_token: &str,
        currency_token: &str,
        amount: f64,
        reply: &mut Reply,
    ) -> Result<(), EconAdminError> {
        let currencies = host.currencies();
        let Some(currency) = pick_currency(reply, currency_token, &currencies) else {
            return Ok(());
        };
        let accounts = host.accounts();
        let Some(account) = pick(
            reply,
            "Account",
            "accounts",
            account_token,
            &accounts,
            "Use /ea-accounts to search for accounts.",
        ) else {
            return Ok(());
        };

        let before = host.balance(account.id, currency.id)?;
        host.add_currency(account.id, currency.id, amount)?;
        let after = host.balance(account.id, currency.id)?;

        let action = if amount >= 0.0 { "Added" } else { "Removed" };
        reply.say(format!(
            "{} {:.2} {}",
            action,
            amount.abs(),
            currency.display_name()
        ));
        reply.say(format!(
            "Account: {} | Before: {:.2} → After: {:.2}",
            account.display_name(),
            before,
            after
        ));
        info!(
            target: AUDIT_TARGET,
            "adjust account={} currency={} amount={:.2} before={:.2} after={:.2}",
            account.id,
            currency.id,
            amount,
            before,
            after
        );
        Ok(())
    }

    fn wipe<H: EconomyHost + ?Sized>(
        &self,
        host: &mut H,
        account_token: &str,
        currency_token: &str,
        reply: &mut Reply,
    ) -> Result<(), EconAdminError> {
        let currencies = host.currencies();
        let Some(currency) = pick_currency(reply, currency_token, &currencies) else {
            return Ok(());
        };
        let accounts = host.accounts();
        let Some(account) = pick(
            reply,
            "Account",
            "accounts",
            account_token,
            &accounts,
            "Use /ea-accounts to search for accounts.",
        ) else {
            return Ok(());
        };

        let balance = host.balance(account.id, currency.id)?;
        if balance <= 0.0 {
            reply.say(format!(
                "Account has no {} to remove.",
                currency.display_name()
            ));
            return Ok(());
        }

        host.add_currency(account.id, currency.id, -balance)?;
        reply.say(format!(
            "Wiped {:.2} {} from '{}'",
            balance,
            currency.display_name(),
            account.display_name()
        ));
        info!(
            target: AUDIT_TARGET,
            "wipe account={} currency={} removed={:.2}",
            account.id,
            currency.id,
            balance
        );
        Ok(())
    }

    fn preview<H: EconomyHost + ?Sized>(&self, host: &H, pattern: &str, reply: &mut Reply) {
        let currencies = host.currencies();
        let selected = select_by_pattern(pattern, &currencies);

        if selected.is_empty() {
            reply.say(format!("No currencies match pattern: '{}'", pattern));
            reply.say("Tip: Use * wildcard - examples: *Credit, Test*, *Old*");
            return;
        }

        reply.say(format!(
            "Pattern '{}' matches {} currencies:",
            pattern,
            selected.len()
        ));
        for currency in selected.iter().take(self.config.preview_limit) {
            reply.item(currency.display_name());
        }
        reply.more(self.config.preview_limit, selected.len());
    }

    fn purge<H: EconomyHost + ?Sized>(
        &self,
        host: &mut H,
        pattern: &str,
        reply: &mut Reply,
    ) -> Result<(), EconAdminError> {
        let currencies = host.currencies();
        let selected = select_by_pattern(pattern, &currencies);

        if selected.is_empty() {
            reply.say(format!("No currencies match pattern: '{}'", pattern));
            return Ok(());
        }

        info!(
            target: AUDIT_TARGET,
            "purge pattern='{}' currencies={}",
            escape_log(pattern),
            name_list(selected.iter().map(|c| c.display_name()))
        );
        reply.say(format!(
            "⚠ PURGING {} currencies matching '{}'...",
            selected.len(),
            pattern
        ));

        let accounts = host.accounts();
        let mut total_accounts = 0usize;
        let mut total_removed = 0.0f64;

        for currency in &selected {
            let mut modified = 0usize;
            let mut removed = 0.0f64;

            for account in &accounts {
                let balance = host.balance(account.id, currency.id)?;
                if balance > 0.0 {
                    host.add_currency(account.id, currency.id, -balance)?;
                    modified += 1;
                    removed += balance;
                }
            }

            if modified > 0 {
                total_accounts += modified;
                total_removed += removed;
                reply.item(format!(
                    "{}: {:.2} removed from {} accounts",
                    currency.display_name(),
                    removed,
                    modified
                ));
                info!(
                    target: AUDIT_TARGET,
                    "purge currency={} removed={:.2} accounts={}",
                    currency.id,
                    removed,
                    modified
                );
            }
        }

        if total_accounts == 0 {
            reply.say("No balances found to remove.");
        } else {
            reply.say(format!(
                "✓ Complete: {} currencies purged",
                selected.len()
            ));
            reply.say(format!(
                "Total removed: {:.2} from {} account operations",
                total_removed, total_accounts
            ));
        }
        Ok(())
    }

    fn balance<H: EconomyHost + ?Sized>(
        &self,
        host: &H,
        account_token: &str,
        reply: &mut Reply,
    ) -> Result<(), EconAdminError> {
        let accounts = host.accounts();
        let Some(account) = pick(
            reply,
            "Account",
            "accounts",
            account_token,
            &accounts,
            "Use /ea-accounts to search for accounts.",
        ) else {
            return Ok(());
        };

        let currencies = host.currencies();
        let mut holdings: Vec<(String, f64)> = host
            .holdings(account.id)?
            .into_iter()
            .filter(|(_, amount)| *amount > 0.0)
            .filter_map(|(currency_id, amount)| {
                currencies
                    .iter()
                    .find(|c| c.id == currency_id)
                    .map(|c| (c.display_name(), amount))
            })
            .collect();
        holdings.sort_by(|a, b| b.1.total_cmp(&a.1));

        if holdings.is_empty() {
            reply.say(format!(
                "Account '{}' has no currency.",
                account.display_name()
            ));
            return Ok(());
        }

        reply.say(format!("Account: {}", account.display_name()));
        reply.say(format!("Holdings ({} currencies):", holdings.len()));
        for (name, amount) in holdings.iter().take(self.config.balance_limit) {
            reply.item(format!("{:.2} {}", amount, name));
        }
        reply.more(self.config.balance_limit, holdings.len());
        Ok(())
    }

    fn gc_status<H: EconomyHost + ?Sized>(
        &self,
        host: &H,
        reply: &mut Reply,
    ) -> Result<(), EconAdminError> {
        let (Some(currency_name), Some(treasury_name)) =
            (self.config.global_currency.as_deref(), self.config.treasury_name())
        else {
            reply.say("No global currency configured. Set admin.global_currency in the config file.");
            return Ok(());
        };

        let currencies = host.currencies();
        let accounts = host.accounts();
        let currency = find_by_name(currency_name, &currencies);
        let treasury = find_by_name(&treasury_name, &accounts);

        let currency_status = if currency.is_some() { "Found" } else { "Not found" };
        let treasury_status = match treasury {
            Some(treasury) => {
                let balance = match currency {
                    Some(currency) => format!("{:.2}", host.balance(treasury.id, currency.id)?),
                    None => "N/A".to_string(),
                };
                format!("Found | Balance: {}", balance)
            }
            None => "Not found".to_string(),
        };
        let gift = match self.config.new_player_gift {
            0 => "Disabled".to_string(),
            amount => amount.to_string(),
        };

        reply.say("=== Global Currency Status ===");
        reply.say(format!("Currency Name:   {}", currency_name));
        reply.say(format!("Currency:        {}", currency_status));
        reply.say(format!("Treasury:        {} ({})", treasury_status, treasury_name));
        reply.say(format!("New Player Gift: {}", gift));
        Ok(())
    }

    fn gc_gift<H: EconomyHost + ?Sized>(
        &self,
        host: &mut H,
        account_token: &str,
        amount: Option<f64>,
        reply: &mut Reply,
    ) -> Result<(), EconAdminError> {
        let currencies = host.currencies();
        let Some(currency) = self.global_currency(&currencies, reply) else {
            return Ok(());
        };
        let accounts = host.accounts();
        let Some(account) = pick(
            reply,
            "Account",
            "accounts",
            account_token,
            &accounts,
            "Use /ea-accounts to search for accounts.",
        ) else {
            return Ok(());
        };

        // Non-positive explicit amounts fall back to the configured gift
        let amount = match amount {
            Some(amount) if amount > 0.0 => amount,
            _ => self.config.new_player_gift as f64,
        };
        if amount <= 0.0 {
            reply.say("No amount given and new_player_gift is 0. Provide an explicit amount.");
            return Ok(());
        }

        host.add_currency(account.id, currency.id, amount)?;
        reply.say(format!(
            "Gifted {:.2} {} to '{}'",
            amount,
            currency.display_name(),
            account.display_name()
        ));
        info!(
            target: AUDIT_TARGET,
            "gift account={} currency={} amount={:.2}",
            account.id,
            currency.id,
            amount
        );
        Ok(())
    }

    fn gc_mint<H: EconomyHost + ?Sized>(
        &self,
        host: &mut H,
        amount: f64,
        reply: &mut Reply,
    ) -> Result<(), EconAdminError> {
        let currencies = host.currencies();
        let Some(currency) = self.global_currency(&currencies, reply) else {
            return Ok(());
        };
        let Some(treasury_name) = self.config.treasury_name() else {
            return Ok(());
        };
        let accounts = host.accounts();
        let Some(treasury) = find_by_name(&treasury_name, &accounts) else {
            reply.say(format!("Treasury '{}' not found.", treasury_name));
            return Ok(());
        };

        let before = host.balance(treasury.id, currency.id)?;
        host.add_currency(treasury.id, currency.id, amount)?;
        let after = host.balance(treasury.id, currency.id)?;

        reply.say(format!(
            "Minted {:.2} {} into '{}'",
            amount,
            currency.display_name(),
            treasury_name
        ));
        reply.say(format!("Treasury balance: {:.2} → {:.2}", before, after));
        info!(
            target: AUDIT_TARGET,
            "mint treasury={} currency={} amount={:.2} before={:.2} after={:.2}",
            treasury.id,
            currency.id,
            amount,
            before,
            after
        );
        Ok(())
    }

    /// Look up the configured global currency by exact name.
    fn global_currency<'c, E: Entity>(&self, currencies: &'c [E], reply: &mut Reply) -> Option<&'c E> {
        let Some(name) = self.config.global_currency.as_deref() else {
            reply.say("Global currency is not configured.");
            return None;
        };
        let currency = find_by_name(name, currencies);
        if currency.is_none() {
            reply.say(format!("Global currency '{}' not found.", name));
        }
        currency
    }
}

fn pick_currency<'c, E: Entity>(reply: &mut Reply, token: &str, currencies: &'c [E]) -> Option<&'c E> {
    pick(
        reply,
        "Currency",
        "currencies",
        token,
        currencies,
        "Use /ea-currencies to see all currencies.",
    )
}

/// Resolve a token and report not-found or ambiguous outcomes to the admin.
fn pick<'c, E: Entity>(
    reply: &mut Reply,
    kind: &str,
    plural: &str,
    token: &str,
    candidates: &'c [E],
    hint: &str,
) -> Option<&'c E> {
    match resolve(token, candidates) {
        Resolution::Found(entity) => Some(entity),
        Resolution::NotFound => {
            reply.say(format!("{} '{}' not found.", kind, token));
            reply.say(hint);
            None
        }
        Resolution::Ambiguous { candidates, total } => {
            reply.say(format!("'{}' matches {} {}:", token, total, plural));
            reply.lines.extend(format_candidates(&candidates, total));
            reply.say("Be more specific or use the id.");
            None
        }
    }
}

fn help(reply: &mut Reply) {
    reply.say("Admin economy commands:");
    for usage in [
        ACCOUNTS_USAGE,
        CURRENCIES_USAGE,
        ADJUST_USAGE,
        WIPE_USAGE,
        PREVIEW_USAGE,
        PURGE_USAGE,
        BALANCE_USAGE,
        GC_STATUS_USAGE,
        GC_GIFT_USAGE,
        "/ea-gc mint <amount>",
    ] {
        reply.item(usage);
    }
    reply.say("Accounts and currencies accept an id, a name, or part of a name.");
    reply.say("Patterns: *Credit, Player*, Old*Coin, *Test*");
}
