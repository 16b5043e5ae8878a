use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["adboard"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_login() {
    let cli = Cli::try_parse_from([
        "adboard", "login", "--token", "tok", "--user-id", "u1", "--admin",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Login { ref token, ref user_id, admin: true })
            if token == "tok" && user_id == "u1"
    ));
}

#[test]
fn entities_default_to_campaigns_over_thirty_days() {
    let cli = Cli::try_parse_from(["adboard", "entities", "--platform", "meta"]).unwrap();
    let Some(Commands::Entities {
        platform,
        level,
        range,
        json,
    }) = cli.command
    else {
        panic!("expected entities command");
    };
    assert_eq!(platform, Platform::Meta);
    assert_eq!(level, LevelArg::Campaign);
    assert_eq!(range.date_range(), DateRange::Preset(DatePreset::Last30Days));
    assert!(!json);
}

#[test]
fn entities_accept_platform_aliases_and_levels() {
    let cli = Cli::try_parse_from([
        "adboard",
        "entities",
        "--platform",
        "google_ads",
        "--level",
        "ad-group",
        "--preset",
        "7days",
    ])
    .unwrap();
    let Some(Commands::Entities {
        platform,
        level,
        range,
        ..
    }) = cli.command
    else {
        panic!("expected entities command");
    };
    assert_eq!(platform, Platform::Google);
    assert_eq!(EntityLevel::from(level), EntityLevel::AdSet);
    assert_eq!(range.date_range(), DateRange::Preset(DatePreset::Last7Days));
}

#[test]
fn custom_bounds_override_preset() {
    let cli = Cli::try_parse_from([
        "adboard",
        "overview",
        "--platform",
        "shopify",
        "--preset",
        "today",
        "--from",
        "2026-03-01",
    ])
    .unwrap();
    let Some(Commands::Overview { range, .. }) = cli.command else {
        panic!("expected overview command");
    };
    let expected = DateRange::Custom {
        from: NaiveDate::from_ymd_opt(2026, 3, 1),
        to: None,
    };
    assert_eq!(range.date_range(), expected);
    assert!(!range.date_range().is_complete());
}

#[test]
fn rejects_unknown_platform() {
    assert!(Cli::try_parse_from(["adboard", "status", "--platform", "tiktok"]).is_err());
    assert!(Cli::try_parse_from(["adboard", "refresh", "--platform", "tiktok"]).is_err());
}

#[test]
fn guard_defaults_to_authenticated_root() {
    let cli = Cli::try_parse_from(["adboard", "guard"]).unwrap();
    let Some(Commands::Guard { route, path }) = cli.command else {
        panic!("expected guard command");
    };
    assert_eq!(RouteGuard::from(route), RouteGuard::Authenticated);
    assert_eq!(path, "/");
}

#[test]
fn parses_select_account() {
    let cli = Cli::try_parse_from([
        "adboard",
        "select-account",
        "--platform",
        "meta",
        "act_123",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::SelectAccount { platform: Platform::Meta, ref account_id })
            if account_id == "act_123"
    ));
}

#[test]
fn session_commands_are_local() {
    let local = |args: &[&str]| {
        Cli::try_parse_from(args.iter().copied())
            .unwrap()
            .command
            .is_some_and(|c| c.is_local())
    };
    assert!(local(&["adboard", "login", "--token", "t", "--user-id", "u1"]));
    assert!(local(&["adboard", "logout"]));
    assert!(local(&["adboard", "guard", "--route", "admin", "/admin"]));
    assert!(!local(&["adboard", "status"]));
    assert!(!local(&["adboard", "overview", "--platform", "meta"]));
}

#[test]
fn session_commands_run_without_backend_config() {
    let local = LocalConfig {
        log_level: "info".to_string(),
        storage_path: std::env::temp_dir().join(format!(
            "adboard-cli-local-{}-{:?}.json",
            std::process::id(),
            std::thread::current().id()
        )),
        sign_in_path: "/login".to_string(),
    };

    let login = Cli::try_parse_from(["adboard", "login", "--token", "t", "--user-id", "u1"])
        .unwrap()
        .command
        .unwrap();
    run_local(&local, login).unwrap();
    assert_eq!(
        session::open_session(&local).user_id().unwrap().as_deref(),
        Some("u1")
    );

    run_local(&local, Commands::Logout).unwrap();
    assert_eq!(session::open_session(&local).access_token().unwrap(), None);
    assert!(run_local(&local, Commands::Status).is_err());

    let _ = std::fs::remove_file(&local.storage_path);
}
