//! Reporting commands backed by the dashboard loaders.

use adboard_client::EntityLevel;
use adboard_core::{DateRange, Platform};
use adboard_dashboard::{
    AdsPlatform, AdsState, FetchContext, FetchOutcome, GoogleDataLoader, Loadable, MetaDataLoader,
    OverviewLoader, PlatformStatusResolver, PlatformStatusState, ShopifyDataLoader, ShopifyState,
};
use serde::Serialize;
use serde_json::Value;

use crate::session::Context;

const MISSING: &str = "-";

/// Resolve platform status for `user_id`, failing loudly where the
/// dashboard would show a banner.
async fn resolve_platforms(ctx: &Context, user_id: &str) -> anyhow::Result<PlatformStatusState> {
    let state = PlatformStatusResolver::new(ctx.client.clone())
        .resolve(Some(user_id))
        .await;
    if ctx.client.expiry().is_expired() {
        anyhow::bail!("session expired; run `adboard login` again");
    }
    if let Some(err) = state.error {
        anyhow::bail!("could not load platform status: {err}");
    }
    Ok(state)
}

/// Explain why a load was skipped.
fn report_skipped(platform: Platform, platforms: &PlatformStatusState, range: &DateRange) {
    let connection = platforms.status.get(platform);
    if !connection.connected {
        println!("{platform} is not connected for this user");
    } else if connection.selected_account().is_none() {
        println!("no {platform} account selected; run `adboard select-account --platform {platform} <id>`");
    } else if !range.is_complete() {
        println!("custom range needs both --from and --to");
    } else {
        println!("nothing to load for {platform}");
    }
}

/// Print a slice's error, if any, to stderr.
fn warn_on<T>(label: &str, slice: &Loadable<T>) {
    if let Some(err) = &slice.error {
        eprintln!("{label}: {err}");
    }
}

/// Show platform connections for the signed-in user.
///
/// # Errors
///
/// Returns an error if no session is stored or the status request fails.
pub(crate) async fn run_status(ctx: &Context) -> anyhow::Result<()> {
    let user_id = ctx.require_user()?;
    let platforms = resolve_platforms(ctx, &user_id).await?;

    println!("{:<10}{:<11}ACCOUNT", "PLATFORM", "CONNECTED");
    for platform in Platform::ALL {
        let connection = platforms.status.get(platform);
        println!(
            "{:<10}{:<11}{}",
            platform.as_str(),
            if connection.connected { "yes" } else { "no" },
            connection.account_id.as_deref().unwrap_or(MISSING)
        );
    }
    Ok(())
}

/// List selectable ad accounts.
///
/// # Errors
///
/// Returns an error for Shopify (no ad accounts) or if the request fails.
pub(crate) async fn run_accounts(ctx: &Context, platform: Platform) -> anyhow::Result<()> {
    let accounts = match platform {
        Platform::Meta => ctx.client.meta_ad_accounts().await?,
        Platform::Google => ctx.client.google_ad_accounts().await?,
        Platform::Shopify => anyhow::bail!("shopify has no ad accounts; the linked shop is used"),
    };

    if accounts.is_empty() {
        println!("no {platform} ad accounts available");
        return Ok(());
    }
    println!("{:<28}{:<10}NAME", "ID", "CURRENCY");
    for account in &accounts {
        println!(
            "{:<28}{:<10}{}",
            account.id,
            account.currency.as_deref().unwrap_or(MISSING),
            account.name.as_deref().unwrap_or(MISSING)
        );
    }
    Ok(())
}

/// # Errors
///
/// Returns an error for Shopify or if the backend rejects the selection.
pub(crate) async fn run_select_account(
    ctx: &Context,
    platform: Platform,
    account_id: &str,
) -> anyhow::Result<()> {
    let ack = match platform {
        Platform::Meta => ctx.client.select_meta_account(account_id).await?,
        Platform::Google => ctx.client.select_google_account(account_id).await?,
        Platform::Shopify => anyhow::bail!("shopify accounts are selected when the shop is linked"),
    };
    println!(
        "{}",
        ack.message
            .unwrap_or_else(|| format!("selected {platform} account {account_id}"))
    );
    Ok(())
}

/// Load one platform's entities with insights and print one level.
///
/// # Errors
///
/// Returns an error if no session is stored, platform status cannot be
/// loaded, or output cannot be serialized.
pub(crate) async fn run_entities(
    ctx: &Context,
    platform: Platform,
    level: EntityLevel,
    range: DateRange,
    json: bool,
) -> anyhow::Result<()> {
    let user_id = ctx.require_user()?;
    let platforms = resolve_platforms(ctx, &user_id).await?;
    let fetch = FetchContext {
        user_id: Some(&user_id),
        platforms: &platforms,
        date_range: range,
    };

    match platform {
        Platform::Meta => {
            let loader = MetaDataLoader::new(ctx.client.clone(), ctx.resync_window());
            if loader.load(&fetch).await == FetchOutcome::Skipped {
                report_skipped(platform, &platforms, &range);
                return Ok(());
            }
            print_ads_level(&loader.snapshot(), level, json)
        }
        Platform::Google => {
            let loader = GoogleDataLoader::new(ctx.client.clone(), ctx.resync_window());
            if loader.load(&fetch).await == FetchOutcome::Skipped {
                report_skipped(platform, &platforms, &range);
                return Ok(());
            }
            print_ads_level(&loader.snapshot(), level, json)
        }
        Platform::Shopify => {
            let loader = ShopifyDataLoader::new(ctx.client.clone(), ctx.resync_window());
            if loader.load(&fetch).await == FetchOutcome::Skipped {
                report_skipped(platform, &platforms, &range);
                return Ok(());
            }
            print_shopify(&loader.snapshot(), json)
        }
    }
}

/// Trigger a backend resync and print the reloaded entity counts.
///
/// # Errors
///
/// Returns an error if no session is stored or platform status cannot be
/// loaded. Resync failures are printed, not returned.
pub(crate) async fn run_refresh(ctx: &Context, platform: Platform) -> anyhow::Result<()> {
    let user_id = ctx.require_user()?;
    let platforms = resolve_platforms(ctx, &user_id).await?;
    let range = DateRange::default();
    let fetch = FetchContext {
        user_id: Some(&user_id),
        platforms: &platforms,
        date_range: range,
    };

    println!(
        "resyncing {platform}; reloading in {} ms",
        ctx.config.resync_grace_ms
    );
    let (outcome, refresh, counts) = match platform {
        Platform::Meta => {
            let loader = MetaDataLoader::new(ctx.client.clone(), ctx.resync_window());
            let outcome = loader.refresh(&fetch).await;
            let state = loader.snapshot();
            (outcome, state.refresh.clone(), ads_counts(&state))
        }
        Platform::Google => {
            let loader = GoogleDataLoader::new(ctx.client.clone(), ctx.resync_window());
            let outcome = loader.refresh(&fetch).await;
            let state = loader.snapshot();
            (outcome, state.refresh.clone(), ads_counts(&state))
        }
        Platform::Shopify => {
            let loader = ShopifyDataLoader::new(ctx.client.clone(), ctx.resync_window());
            let outcome = loader.refresh(&fetch).await;
            let state = loader.snapshot();
            let counts = format!(
                "{} orders, {} products, {} customers",
                state.orders.data.len(),
                state.products.data.len(),
                state.customers.data.len()
            );
            (outcome, state.refresh, counts)
        }
    };

    if outcome == FetchOutcome::Skipped {
        report_skipped(platform, &platforms, &range);
        return Ok(());
    }
    match (refresh.error, refresh.data) {
        (Some(err), _) => println!("resync failed: {err}"),
        (None, Some(ack)) => {
            if let Some(message) = ack.message {
                println!("{message}");
            }
            println!("reloaded: {counts}");
        }
        (None, None) => println!("resync not accepted"),
    }
    Ok(())
}

/// Print the daily series and its totals.
///
/// # Errors
///
/// Returns an error if no session is stored, platform status cannot be
/// loaded, or output cannot be serialized.
pub(crate) async fn run_overview(
    ctx: &Context,
    platform: Platform,
    range: DateRange,
    json: bool,
) -> anyhow::Result<()> {
    let user_id = ctx.require_user()?;
    let platforms = resolve_platforms(ctx, &user_id).await?;
    let fetch = FetchContext {
        user_id: Some(&user_id),
        platforms: &platforms,
        date_range: range,
    };

    let loader = OverviewLoader::new(ctx.client.clone(), platform);
    if loader.load(&fetch).await == FetchOutcome::Skipped {
        report_skipped(platform, &platforms, &range);
        return Ok(());
    }

    let state = loader.snapshot();
    warn_on("overview", &state.points);
    let totals = state.totals();

    if json {
        let body = serde_json::json!({
            "window": state.window,
            "points": state.points.data,
            "totals": totals,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!(
        "{:<12}{:>12}{:>14}{:>10}{:>12}{:>8}",
        "DATE", "SPEND", "IMPRESSIONS", "CLICKS", "REVENUE", "ORDERS"
    );
    for p in &state.points.data {
        println!(
            "{:<12}{:>12.2}{:>14.0}{:>10.0}{:>12.2}{:>8.0}",
            p.date, p.spend, p.impressions, p.clicks, p.revenue, p.orders
        );
    }
    println!(
        "{:<12}{:>12.2}{:>14.0}{:>10.0}{:>12.2}{:>8.0}",
        "TOTAL", totals.spend, totals.impressions, totals.clicks, totals.revenue, totals.orders
    );
    if let Some(roas) = totals.roas {
        println!("ROAS {roas:.2}");
    }
    Ok(())
}

fn ads_counts<P: AdsPlatform>(state: &AdsState<P>) -> String {
    format!(
        "{} campaigns, {} ad sets, {} ads",
        state.campaigns.data.len(),
        state.ad_sets.data.len(),
        state.ads.data.len()
    )
}

fn to_rows<T: Serialize>(items: &[T]) -> anyhow::Result<Vec<Value>> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(Into::into))
        .collect()
}

fn print_ads_level<P>(state: &AdsState<P>, level: EntityLevel, json: bool) -> anyhow::Result<()>
where
    P: AdsPlatform,
    P::Campaign: Serialize,
    P::AdSet: Serialize,
    P::Ad: Serialize,
{
    let rows = match level {
        EntityLevel::Campaign => {
            warn_on("campaigns", &state.campaigns);
            warn_on("campaign insights", &state.campaign_insights);
            to_rows(&state.campaigns_with_insights())?
        }
        EntityLevel::AdSet => {
            warn_on("ad sets", &state.ad_sets);
            warn_on("ad set insights", &state.ad_set_insights);
            to_rows(&state.ad_sets_with_insights())?
        }
        EntityLevel::Ad => {
            warn_on("ads", &state.ads);
            warn_on("ad insights", &state.ad_insights);
            to_rows(&state.ads_with_insights())?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("no {level} entities");
        return Ok(());
    }

    println!(
        "{:<22}{:<34}{:<10}{:>12}{:>14}{:>10}",
        "ID", "NAME", "STATUS", "SPEND", "IMPRESSIONS", "CLICKS"
    );
    for row in &rows {
        let insights = &row["insights"];
        println!(
            "{:<22}{:<34}{:<10}{:>12}{:>14}{:>10}",
            text(&row["id"]),
            truncate(&text(&row["name"]), 32),
            text(&row["status"]),
            metric(&insights["spend"], 2),
            metric(&insights["impressions"], 0),
            metric(&insights["clicks"], 0),
        );
    }
    Ok(())
}

fn print_shopify(state: &ShopifyState, json: bool) -> anyhow::Result<()> {
    warn_on("orders", &state.orders);
    warn_on("products", &state.products);
    warn_on("customers", &state.customers);

    if json {
        let body = serde_json::json!({
            "orders": state.orders.data,
            "products": state.products.data,
            "customers": state.customers.data,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!(
        "{} orders, {} products, {} customers",
        state.orders.data.len(),
        state.products.data.len(),
        state.customers.data.len()
    );
    if state.orders.data.is_empty() {
        return Ok(());
    }
    println!();
    println!("{:<12}{:>12}{:<6}{:<16}CREATED", "ORDER", "TOTAL", "", "STATUS");
    for order in &state.orders.data {
        let currency = format!(" {}", order.currency.as_deref().unwrap_or(""));
        println!(
            "{:<12}{:>12}{:<6}{:<16}{}",
            order.name.as_deref().unwrap_or(&order.id),
            order.total_price.to_string(),
            currency,
            order.financial_status.as_deref().unwrap_or(MISSING),
            order.created_at.as_deref().unwrap_or(MISSING)
        );
    }
    Ok(())
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => MISSING.to_string(),
        other => other.to_string(),
    }
}

fn metric(value: &Value, decimals: usize) -> String {
    value
        .as_f64()
        .map_or_else(|| MISSING.to_string(), |v| format!("{v:.decimals$}"))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max - 3).collect::<String>())
    } else {
        s.to_string()
    }
}
