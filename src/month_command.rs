use anyhow::{Context, Result};
use log::info;

use crate::calendar::{assemble, MonthView, YearMonth};
use crate::event_source::EventRepository;

/// `month`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct MonthArgs {
    #[clap(
        short = 'm',
        long = "month",
        help = "Sets a custom month in the format YYYY-MM",
        parse(try_from_str = parse_month),
    )]
    month: Option<YearMonth>,

    #[clap(
        long = "shift",
        default_value = "0",
        allow_hyphen_values = true,
        help = "Moves the displayed month by N months (negative for previous months)"
    )]
    shift: i32,
}

pub struct MonthCommand<'a, R: EventRepository> {
    repository: &'a R,
}

impl<'a, R: EventRepository> MonthCommand<'a, R> {
    /// 新しい`MonthCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - 予定を読み込むためのリポジトリ
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// `month`サブコマンドの処理を行う。
    ///
    /// 指定された月から`shift`ヶ月ずらした月のカレンダーを組み立てる。
    /// 月が指定されていない場合は、Localタイムゾーンで現在の月を利用する。
    ///
    /// # Arguments
    ///
    /// * `args` - `month`サブコマンドの引数
    pub fn run(&self, args: MonthArgs) -> Result<MonthView> {
        let base = args.month.unwrap_or_else(YearMonth::current);
        let target = base
            .shift(args.shift)
            .with_context(|| format!("Failed to move {} by {} months", base, args.shift))?;
        info!("Target month: {}", target);

        let events = self
            .repository
            .read_events()
            .context("Failed to read events")?;

        let view = assemble(target.year(), target.month(), &events)
            .with_context(|| format!("Failed to assemble calendar for {}", target))?;

        Ok(view)
    }
}

/// 月をパースする。
fn parse_month(s: &str) -> Result<YearMonth> {
    s.parse::<YearMonth>()
}
