//! Plain-text rendering of chart tables and the dasha tree.

use kundali_chart::BirthChart;
use kundali_time::jd_to_utc;
use kundali_vedic_base::{
    ALL_RASHIS, CONTRIBUTOR_POINTS, DashaPeriod, DashaSnapshot, HouseRow, PositionRow,
    SOUTH_INDIAN_CENTRE, SOUTH_INDIAN_CENTRE_SPAN, SOUTH_INDIAN_GRID, SignChart, VimshottariTree,
    south_indian_rashi_at,
};

const MIN_CELL_WIDTH: usize = 12;

/// Join lines into a block with a trailing newline.
fn block(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// `YYYY-MM-DD` for a JD (UTC), or the raw JD if it is out of chrono's range.
pub fn format_jd_date(jd: f64) -> String {
    jd_to_utc(jd)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| format!("JD {jd:.4}"))
}

pub fn position_table(rows: &[PositionRow]) -> String {
    let header = format!(
        "{:<8} {:>9} {:<16} {:<22} {:<18} {:>4} {:<10} {:<10}",
        "Point", "Long", "DMS", "Sign position", "Nakshatra", "Pada", "Rasi", "Navamsa"
    );
    let body = rows.iter().map(|row| {
        format!(
            "{:<8} {:>9.4} {:<16} {:<22} {:<18} {:>4} {:<10} {:<10}",
            row.point.name(),
            row.longitude,
            row.longitude_dms,
            row.rashi_dms,
            row.nakshatra.name(),
            row.pada,
            row.rashi.name(),
            row.navamsa.name()
        )
    });
    block(std::iter::once(header).chain(body).collect())
}

pub fn house_table(rows: &[HouseRow; 12]) -> String {
    let header = format!("{:>5} {:<12} {:<10} {:<10}", "House", "Sign", "Lord", "Navamsa");
    let body = rows.iter().map(|row| {
        format!(
            "{:>5} {:<12} {:<10} {:<10}",
            row.house,
            row.rashi.name(),
            row.lord.english_name(),
            row.navamsa.name()
        )
    });
    block(std::iter::once(header).chain(body).collect())
}

fn in_centre(row: usize, col: usize) -> bool {
    let (r0, c0) = SOUTH_INDIAN_CENTRE;
    (r0..r0 + SOUTH_INDIAN_CENTRE_SPAN).contains(&row)
        && (c0..c0 + SOUTH_INDIAN_CENTRE_SPAN).contains(&col)
}

/// Horizontal rule above `row`; open where it would cut the centre block.
fn separator(row: usize, width: usize) -> String {
    let open = |col: usize| row > 0 && in_centre(row - 1, col) && in_centre(row, col);
    let mut line = String::from("+");
    for col in 0..SOUTH_INDIAN_GRID {
        let fill = if open(col) { ' ' } else { '-' };
        line.extend(std::iter::repeat_n(fill, width));
        let joint_open = col + 1 < SOUTH_INDIAN_GRID && open(col) && open(col + 1);
        line.push(if joint_open { ' ' } else { '+' });
    }
    line.push('\n');
    line
}

/// South-Indian style 4 × 4 grid: fixed sign cells around a 2 × 2 centre
/// carrying the chart title.
pub fn south_indian_grid(chart: &SignChart) -> String {
    let width = ALL_RASHIS
        .iter()
        .map(|&r| chart.cell_label(r).len().max(r.name().len()))
        .max()
        .unwrap_or(0)
        .saturating_add(2)
        .max(MIN_CELL_WIDTH);
    let centre_width = SOUTH_INDIAN_CENTRE_SPAN * (width + 1) - 1;

    let mut out = String::new();
    for row in 0..SOUTH_INDIAN_GRID {
        out.push_str(&separator(row, width));
        for line in 0..2 {
            out.push('|');
            let mut col = 0;
            while col < SOUTH_INDIAN_GRID {
                if in_centre(row, col) {
                    let title = if row == SOUTH_INDIAN_CENTRE.0 && line == 0 {
                        chart.kind.name()
                    } else {
                        ""
                    };
                    out.push_str(&format!("{title:^centre_width$}|"));
                    col += SOUTH_INDIAN_CENTRE_SPAN;
                    continue;
                }
                let text = match south_indian_rashi_at(row, col) {
                    Some(r) if line == 0 => r.name().to_string(),
                    Some(r) => chart.cell_label(r),
                    None => String::new(),
                };
                out.push_str(&format!(" {text:<w$}|", w = width - 1));
                col += 1;
            }
            out.push('\n');
        }
    }
    out.push_str(&separator(SOUTH_INDIAN_GRID, width));
    out
}

pub fn ashtakavarga_table(chart: &BirthChart) -> String {
    let av = &chart.ashtakavarga;
    let mut header = format!("{:<12}", "Sign");
    for p in CONTRIBUTOR_POINTS {
        header.push_str(&format!("{:>4}", p.abbreviation()));
    }
    header.push_str(&format!("{:>6}", "Total"));
    let body = ALL_RASHIS.iter().enumerate().map(|(i, r)| {
        let mut line = format!("{:<12}", r.name());
        for b in av.bindus[i] {
            line.push_str(&format!("{b:>4}"));
        }
        line.push_str(&format!("{:>6}", av.totals[i]));
        line
    });
    block(std::iter::once(header).chain(body).collect())
}

fn period_lines(period: &DashaPeriod, lines: &mut Vec<String>) {
    let indent = "  ".repeat(period.level.depth() as usize - 1);
    lines.push(format!(
        "{indent}{}: {} to {} ({:.2} y)",
        period.lord.english_name(),
        format_jd_date(period.start_jd),
        format_jd_date(period.end_jd),
        period.years
    ));
    for child in &period.children {
        period_lines(child, lines);
    }
}

pub fn dasha_tree(tree: &VimshottariTree) -> String {
    let b = &tree.balance;
    let mut lines = vec![format!(
        "Moon {:.4} in {} ({:.1}% elapsed), balance of {} = {:.4} y",
        tree.moon_longitude,
        b.nakshatra.name(),
        b.elapsed_fraction * 100.0,
        b.lord.english_name(),
        b.balance_years
    )];
    for period in &tree.periods {
        period_lines(period, &mut lines);
    }
    block(lines)
}

pub fn dasha_snapshot(snapshot: &DashaSnapshot) -> String {
    if snapshot.periods.is_empty() {
        return format!(
            "{} lies outside the dasha tree\n",
            format_jd_date(snapshot.query_jd)
        );
    }
    let lines = snapshot
        .periods
        .iter()
        .map(|p| {
            format!(
                "{:<10} {:<8} {} to {}",
                p.level.name(),
                p.lord.english_name(),
                format_jd_date(p.start_jd),
                format_jd_date(p.end_jd)
            )
        })
        .collect();
    block(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kundali_vedic_base::{
        ChartInputs, ChartKind, GrahaLongitudes, Rashi, sign_chart, vimshottari_tree,
    };

    fn rasi() -> SignChart {
        let grahas = GrahaLongitudes::from_sapta_and_rahu(
            [16.0, 45.0, 95.0, 20.0, 205.0, 340.0, 290.0],
            100.0,
        )
        .unwrap();
        let inputs = ChartInputs::new(grahas, 155.0, 124.0).unwrap();
        sign_chart(&inputs, ChartKind::Rasi)
    }

    #[test]
    fn grid_has_every_sign_once_and_a_title() {
        let text = south_indian_grid(&rasi());
        assert_eq!(text.lines().count(), SOUTH_INDIAN_GRID * 3 + 1);
        for r in ALL_RASHIS {
            let hits = text
                .lines()
                .flat_map(|l| l.split('|'))
                .filter(|cell| cell.trim() == r.name())
                .count();
            assert_eq!(hits, 1, "{r}");
        }
        assert!(text.contains(ChartKind::Rasi.name()));
    }

    #[test]
    fn grid_rows_are_equal_width() {
        let text = south_indian_grid(&rasi());
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{widths:?}");
    }

    #[test]
    fn grid_cell_lists_occupants() {
        let text = south_indian_grid(&rasi());
        assert!(text.contains("Su Me"));
        assert_eq!(rasi().cell_label(Rashi::Kanya), "As");
    }

    #[test]
    fn tree_lists_dates() {
        // 2000-01-01 12:00 UTC, Moon at the start of Ashwini.
        let tree = vimshottari_tree(2_451_545.0, 0.0, 1).unwrap();
        let text = dasha_tree(&tree);
        assert!(text.contains("Ketu: 2000-01-01 to 2007-01-01"));
        assert_eq!(text.lines().count(), 10);
        assert!(text.ends_with(")\n"));
    }

    #[test]
    fn nested_periods_are_indented() {
        let tree = vimshottari_tree(2_451_545.0, 0.0, 2).unwrap();
        let text = dasha_tree(&tree);
        // Header, then 9 mahadashas each followed by 9 bhuktis.
        assert_eq!(text.lines().count(), 1 + 9 * 10);
        let second = text.lines().nth(2).unwrap();
        assert!(second.starts_with("  Ketu: 2000-01-01"), "{second}");
    }

    #[test]
    fn tables_end_with_one_newline() {
        let text = position_table(&[]);
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n') && !text.ends_with("\n\n"));
    }
}
