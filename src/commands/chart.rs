use crate::args::ChartKind;
use crate::chart::render_svg;
use crate::commands::{open_dashboard, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::YearMonth;
use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::NaiveDate;
use std::path::Path;
use tracing::debug;

/// Draws the habit or spending chart for `month` (default: this month) as SVG.
///
/// # Arguments
/// - `account` - For the spending chart. Defaults to the active account.
/// - `out` - Where to write the SVG. When `None` the SVG is the command's view.
pub async fn chart(
    config: &Config,
    today: NaiveDate,
    kind: ChartKind,
    month: Option<YearMonth>,
    account: Option<&str>,
    out: Option<&Path>,
) -> Result<Out<()>> {
    let dashboard = open_dashboard(config, today).await?;
    let month = month.unwrap_or_else(|| dashboard.month());
    let (layout, title) = match kind {
        ChartKind::Habits => (
            dashboard.habit_chart_for(month),
            format!("Habit chart for {}", month.long_name()),
        ),
        ChartKind::Spending => {
            let account_id = account
                .unwrap_or(dashboard.current_account().id.as_str())
                .to_string();
            dashboard.balance(&account_id)?;
            (
                dashboard.spending_chart_for(&account_id, month),
                format!("Spending chart for {account_id} in {}", month.long_name()),
            )
        }
    };
    debug!("{title}: {} bars, {} ticks", layout.bars.len(), layout.ticks.len());

    let svg = render_svg(&layout)
        .context("Unable to draw the chart")
        .pub_result(ErrorType::Internal)?;
    match out {
        Some(path) => {
            utils::write(path, &svg)
                .await
                .with_context(|| format!("Unable to write the chart to {}", path.display()))
                .pub_result(ErrorType::Storage)?;
            Ok(format!("{title} written to {}", path.display()).into())
        }
        None => Ok(Out::new_message(title).with_view(svg)),
    }
}
