//! Argument parsing for `society`. Hand-rolled flag loop; no positional reordering.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminListing {
    Members,
    Deposits,
    Dues,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Logout,
    Me,
    Session,
    Profile,
    Ledger { year: Option<i32> },
    Due { year: Option<i32> },
    Share,
    ChangePassword { current: String, new: String },
    Admin { listing: AdminListing, search: Option<String>, per_page: Option<u32> },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub json: bool,
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage:\n  {program} <command> [flags]\n\nCommands:\n  login <email> <password>          authenticate and store the session\n  logout                            end the session (local state is always cleared)\n  me                                show the authenticated account\n  session                           show the stored session\n  profile                           member profile\n  ledger [--year Y]                 member ledger\n  due [--year Y]                    member due summary\n  share                             share details\n  change-password <current> <new>   change the account password\n  admin members|deposits|due [--search S] [--per-page N]\n\nFlags:\n  --json                            print canonical JSON instead of tables\n  -h, --help                        show this help\n\nEnvironment:\n  SOCIETY_BASE_URL, SOCIETY_CREDENTIALS, SOCIETY_DEVICE_NAME,\n  SOCIETY_CONNECT_TIMEOUT_SECS, SOCIETY_READ_TIMEOUT_SECS, SOCIETY_WRITE_TIMEOUT_SECS, RUST_LOG"
    )
}

/// Parse arguments after the program name. `Err` carries a usage message.
pub fn parse(args: &[String]) -> Result<Invocation, String> {
    let mut json = false;
    let mut year: Option<i32> = None;
    let mut search: Option<String> = None;
    let mut per_page: Option<u32> = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => { json = true; i += 1; continue; }
            "-h" | "--help" => return Ok(Invocation { command: Command::Help, json }),
            "--year" => {
                let v = value(args, i, "--year")?;
                year = Some(v.parse().map_err(|_| format!("--year expects a number, got '{}'", v))?);
                i += 2; continue;
            }
            "--search" => {
                search = Some(value(args, i, "--search")?.to_string());
                i += 2; continue;
            }
            "--per-page" => {
                let v = value(args, i, "--per-page")?;
                per_page = Some(v.parse().map_err(|_| format!("--per-page expects a number, got '{}'", v))?);
                i += 2; continue;
            }
            flag if flag.starts_with("--") => return Err(format!("Unrecognized flag: {}", flag)),
            other => { positional.push(other); i += 1; }
        }
    }

    let rest = positional.get(1..).unwrap_or(&[]);
    let command = match positional.first().copied() {
        None => return Err("missing command".to_string()),
        Some("login") => match rest {
            [email, password] => Command::Login { email: email.to_string(), password: password.to_string() },
            _ => return Err("login requires <email> <password>".to_string()),
        },
        Some("change-password") => match rest {
            [current, new] => Command::ChangePassword { current: current.to_string(), new: new.to_string() },
            _ => return Err("change-password requires <current> <new>".to_string()),
        },
        Some("admin") => {
            let listing = match rest {
                ["members"] => AdminListing::Members,
                ["deposits"] => AdminListing::Deposits,
                ["due"] => AdminListing::Dues,
                _ => return Err("admin requires one of: members, deposits, due".to_string()),
            };
            Command::Admin { listing, search: search.take(), per_page: per_page.take() }
        }
        Some(cmd) => {
            if !rest.is_empty() {
                return Err(format!("{} takes no arguments", cmd));
            }
            match cmd {
                "logout" => Command::Logout,
                "me" => Command::Me,
                "session" => Command::Session,
                "profile" => Command::Profile,
                "ledger" => Command::Ledger { year: year.take() },
                "due" => Command::Due { year: year.take() },
                "share" => Command::Share,
                other => return Err(format!("Unrecognized command: {}", other)),
            }
        }
    };

    if year.is_some() && !matches!(command, Command::Ledger { .. } | Command::Due { .. }) {
        return Err("--year applies to ledger and due only".to_string());
    }
    if (search.is_some() || per_page.is_some()) && !matches!(command, Command::Admin { .. }) {
        return Err("--search and --per-page apply to admin listings only".to_string());
    }
    Ok(Invocation { command, json })
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1).map(String::as_str).ok_or_else(|| format!("{} requires a value", flag))
}
