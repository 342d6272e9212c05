use crate::cli::{Cli, Commands};
use crate::controller::Controller;
use crate::error::AppError;
use crate::output::{
    PredictionTableOptions, location_json, position_json, predictions_json,
    print_predictions_table, render_timeline, session_json,
};
use crate::store::{RestStore, SessionCache};
use crate::timeline::{TimelineRange, date_to_position, position_to_date};
use crate::utils::{Timezone, debug_enabled, debug_log, format_date, format_date_input, parse_date};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) session_cache: SessionCache,
}

impl CommandContext<'_> {
    /// Timeline settings are only checked by commands that place dates
    fn range(&self) -> Result<TimelineRange, AppError> {
        self.cli.timeline()
    }

    fn timezone(&self) -> Result<Timezone, AppError> {
        Timezone::parse(self.cli.timezone.as_deref())
    }

    /// Status lines on stderr, silenced for JSON output
    fn status(&self, message: &str) {
        if !self.cli.json {
            eprintln!("{message}");
        }
    }

    /// Cached session token, creating and caching one on first use.
    /// A cache that cannot be written only costs the next run its session.
    fn session_token(&self) -> (String, bool) {
        let (token, created) = self
            .session_cache
            .load_or_generate(self.cli.session_scheme);
        if created && let Err(e) = self.session_cache.save(&token) {
            eprintln!("Warning: {e}");
        }
        (token, created)
    }

    fn connect(&self) -> Result<Controller<RestStore>, AppError> {
        let url = self.cli.url.as_deref().ok_or(AppError::MissingUrl)?;
        let key = self.cli.key.as_deref().ok_or(AppError::MissingKey)?;
        let controller = Controller::new(RestStore::new(url, key, self.cli.timeout()));
        if debug_enabled() {
            watch_state(&controller);
        }
        controller.begin_session(self.session_token().0);
        Ok(controller)
    }
}

fn watch_state(controller: &Controller<RestStore>) {
    let state = controller.state();
    state
        .user_session
        .subscribe(|s| debug_log!("state: user_session = {s:?}"));
    state
        .has_submitted
        .subscribe(|v| debug_log!("state: has_submitted = {v}"));
    state
        .predictions
        .subscribe(|rows| debug_log!("state: {} predictions", rows.len()));
}

fn handle_list(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let range = ctx.range()?;
    let timezone = ctx.timezone()?;
    let controller = ctx.connect()?;
    controller.refresh()?;
    let state = controller.state();
    let session = state.user_session.get();
    let submitted = state.has_submitted.get();

    state.predictions.with(|rows| {
        if ctx.cli.json {
            println!(
                "{}",
                predictions_json(rows, session.as_deref(), submitted, &range, ctx.cli.sort_order())
            );
        } else if rows.is_empty() {
            println!("No predictions yet.");
        } else {
            print_predictions_table(
                rows,
                session.as_deref(),
                &range,
                PredictionTableOptions {
                    order: ctx.cli.sort_order(),
                    use_color: ctx.cli.use_color(),
                    timezone,
                },
            );
        }
    });

    if submitted {
        ctx.status("You have already submitted a prediction.");
    } else {
        ctx.status("You have not submitted a prediction yet (predboard submit --name NAME --date DATE).");
    }
    Ok(())
}

fn handle_timeline(ctx: &CommandContext<'_>, columns: i64) -> Result<(), AppError> {
    let range = ctx.range()?.with_width(columns as f64)?;
    let controller = ctx.connect()?;
    controller.refresh()?;
    let state = controller.state();
    let session = state.user_session.get();

    state.predictions.with(|rows| {
        if ctx.cli.json {
            println!(
                "{}",
                predictions_json(
                    rows,
                    session.as_deref(),
                    state.has_submitted.get(),
                    &range,
                    ctx.cli.sort_order()
                )
            );
        } else if rows.is_empty() {
            println!("No predictions yet.");
        } else {
            print!(
                "{}",
                render_timeline(rows, session.as_deref(), &range, ctx.cli.use_color())
            );
        }
    });
    Ok(())
}

fn handle_submit(ctx: &CommandContext<'_>, name: &str, date: &str) -> Result<(), AppError> {
    let date = parse_date(date)?;
    let controller = ctx.connect()?;
    controller.refresh()?;

    if let Some(existing) = controller.own_prediction() {
        ctx.status(&format!(
            "Existing prediction: {} on {}",
            existing.name,
            format_date(existing.prediction_date)
        ));
    }
    let quiet = ctx.cli.json;
    let notice = controller.state().has_submitted.subscribe(move |submitted| {
        if *submitted && !quiet {
            eprintln!("This session has a prediction on record.");
        }
    });
    let result = controller.submit(name, date);
    controller.state().has_submitted.unsubscribe(notice);
    let saved = result?;

    if ctx.cli.json {
        let session = controller.state().user_session.get();
        println!(
            "{}",
            predictions_json(
                std::slice::from_ref(&saved),
                session.as_deref(),
                true,
                &ctx.range()?,
                ctx.cli.sort_order()
            )
        );
    } else {
        println!(
            "Saved: {} predicts {} ({} of {} predictions).",
            saved.name,
            format_date(saved.prediction_date),
            controller
                .state()
                .predictions
                .with(|rows| rows.iter().position(|p| p.id == saved.id).map_or(0, |i| i + 1)),
            controller.state().predictions.with(|rows| rows.len())
        );
    }
    Ok(())
}

fn handle_locate(ctx: &CommandContext<'_>, date: &str) -> Result<(), AppError> {
    let date = parse_date(date)?;
    let range = ctx.range()?;
    let position = date_to_position(date, range.start(), range.end(), range.width())?;
    if ctx.cli.json {
        println!("{}", location_json(date, &range));
    } else {
        println!("{position}");
        if !range.contains(date) {
            ctx.status(&format!(
                "Note: {} is outside {} \u{2013} {}",
                format_date(date),
                format_date(range.start()),
                format_date(range.end())
            ));
        }
    }
    Ok(())
}

fn handle_at(ctx: &CommandContext<'_>, position: f64) -> Result<(), AppError> {
    let range = ctx.range()?;
    let date = position_to_date(position, range.start(), range.end(), range.width())?;
    if ctx.cli.json {
        println!("{}", position_json(position, date, &range));
    } else {
        println!("{}", format_date(date));
        if !range.contains(date) {
            ctx.status(&format!(
                "Note: position {position} is past the timeline edge"
            ));
        }
    }
    Ok(())
}

fn handle_session(ctx: &CommandContext<'_>, rotate: bool) -> Result<(), AppError> {
    let (token, created) = if rotate {
        let token = ctx.cli.session_scheme.generate();
        ctx.session_cache.save(&token)?;
        (token, true)
    } else {
        ctx.session_token()
    };

    if ctx.cli.json {
        println!("{}", session_json(&token, created, ctx.session_cache.path()));
    } else {
        println!("{token}");
        if created {
            ctx.status("Started a new session.");
        }
    }
    Ok(())
}

fn handle_format(ctx: &CommandContext<'_>, input: &str) -> Result<(), AppError> {
    let formatted = format_date_input(input);
    if ctx.cli.json {
        println!("{}", serde_json::json!({ "input": input, "formatted": formatted }));
    } else {
        println!("{formatted}");
    }
    Ok(())
}

/// Run the selected command; `List` when none was given
pub(crate) fn run(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let command = ctx.cli.command.clone().unwrap_or(Commands::List);
    debug_log!("command {command:?}");
    match command {
        Commands::List => handle_list(ctx),
        Commands::Timeline { columns } => handle_timeline(ctx, columns),
        Commands::Submit { name, date } => handle_submit(ctx, &name, &date),
        Commands::Locate { date } => handle_locate(ctx, &date),
        Commands::At { position } => handle_at(ctx, position),
        Commands::Format { date } => handle_format(ctx, &date),
        Commands::Session { new } => handle_session(ctx, new),
    }
}
