//! Text reports over decoded submissions and aggregated statistics.
//!
//! All the functions return the formatted text. Routing it to the console or to a
//! file is left to the caller.

use crate::config::*;
use crate::Aggregate;

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Lists every submission with its rank, number and initials.
pub fn render_submissions(submissions: &[DecodedRanking]) -> String {
    let mut out = String::new();
    let plural = if submissions.len() > 1 { "s" } else { "" };
    push_line(
        &mut out,
        &format!(
            "\n=== Decoded Rankings ({} submission{}) ===\n",
            submissions.len(),
            plural
        ),
    );
    for (idx, submission) in submissions.iter().enumerate() {
        push_line(
            &mut out,
            &format!("Submission {} - {}:", idx + 1, submission.object),
        );
        for r in submission.rankings.iter() {
            push_line(
                &mut out,
                &format!("  {:>3}: {:>3} → {}", r.rank, r.number, r.initials),
            );
        }
        push_line(&mut out, "");
    }
    out
}

/// The leaderboard of one object: contributors by average rank, best first.
pub fn render_leaderboard(stats: &ObjectStats) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        &format!("\n=== Aggregated Statistics: {} ===\n", stats.object),
    );
    push_line(
        &mut out,
        "Rank | Initials | Avg Rank | Total Rank | Count | Individual Ranks",
    );
    push_line(
        &mut out,
        "-----|----------|----------|------------|-------|------------------",
    );
    for (idx, c) in stats.leaderboard().iter().enumerate() {
        let ranks: Vec<String> = c.ranks.iter().map(|r| r.to_string()).collect();
        push_line(
            &mut out,
            &format!(
                "{:>4} | {:<8} | {:>8.2} | {:>10} | {:>5} | {}",
                idx + 1,
                c.initials,
                c.average_rank(),
                c.total_rank,
                c.count,
                ranks.join(", ")
            ),
        );
    }
    push_line(&mut out, "\n");
    out
}

/// One leaderboard per object, in order of first appearance.
pub fn render_leaderboards(agg: &Aggregate) -> String {
    agg.objects().iter().map(render_leaderboard).collect()
}

/// The submissions as CSV blocks, one block per submission.
pub fn render_csv(submissions: &[DecodedRanking]) -> csv::Result<String> {
    let mut out = String::new();
    push_line(&mut out, "=== Decoded CSV (for export) ===\n");
    for (idx, submission) in submissions.iter().enumerate() {
        push_line(
            &mut out,
            &format!("# Submission {} - {}", idx + 1, submission.object),
        );
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::<u8>::new());
        wtr.write_record(["rank", "number", "initials", "object"])?;
        for r in submission.rankings.iter() {
            wtr.write_record([
                r.rank.to_string().as_str(),
                r.number.as_str(),
                r.initials.as_str(),
                submission.object.as_str(),
            ])?;
        }
        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        out.push_str(&String::from_utf8_lossy(&bytes));
        push_line(&mut out, "");
    }
    Ok(out)
}

/// The full report of a run: submissions, leaderboards and CSV export.
pub fn render_report(submissions: &[DecodedRanking], agg: &Aggregate) -> csv::Result<String> {
    let mut out = render_submissions(submissions);
    out.push_str(&render_leaderboards(agg));
    out.push_str(&render_csv(submissions)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    fn submissions() -> Vec<DecodedRanking> {
        let manifest = Manifest {
            objects: vec![(
                "X".to_string(),
                ObjectEntry {
                    images: vec!["aaa-001.jpg".to_string(), "bbb-002.jpg".to_string()],
                    ..Default::default()
                },
            )],
        };
        let index = build_index(&manifest, DuplicateNumberPolicy::Reject).unwrap();
        vec![
            parse_ranking_line("X,002,001", &index).unwrap(),
            parse_ranking_line("X,001,002", &index).unwrap(),
        ]
    }

    #[test]
    fn submissions_listing() {
        let subs = submissions();
        let text = render_submissions(&subs[..1]);
        assert_eq!(
            text,
            "\n=== Decoded Rankings (1 submission) ===\n\n\
             Submission 1 - X:\n\
             \x20   1: 002 → bbb\n\
             \x20   2: 001 → aaa\n\
             \n"
        );
        assert!(render_submissions(&subs).contains("(2 submissions)"));
    }

    #[test]
    fn leaderboard_table() {
        let subs = submissions();
        let agg = aggregate(&subs);
        let text = render_leaderboard(agg.get("X").unwrap());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "=== Aggregated Statistics: X ===");
        assert_eq!(
            lines[5],
            "   1 | aaa      |     1.50 |          3 |     2 | 2, 1"
        );
        assert_eq!(
            lines[6],
            "   2 | bbb      |     1.50 |          3 |     2 | 1, 2"
        );
    }

    #[test]
    fn leaderboard_orders_by_average() {
        let stats = ObjectStats {
            object: "Y".to_string(),
            contributors: vec![
                ContributorStats {
                    initials: "slow".to_string(),
                    ranks: vec![3],
                    total_rank: 3,
                    count: 1,
                    manifest_position: None,
                },
                ContributorStats {
                    initials: "fast".to_string(),
                    ranks: vec![1, 2],
                    total_rank: 3,
                    count: 2,
                    manifest_position: None,
                },
                ContributorStats {
                    initials: "mid".to_string(),
                    ranks: vec![2],
                    total_rank: 2,
                    count: 1,
                    manifest_position: None,
                },
            ],
        };
        let text = render_leaderboard(&stats);
        let order: Vec<&str> = text
            .lines()
            .skip(5)
            .take(3)
            .map(|l| l.split('|').nth(1).unwrap().trim())
            .collect();
        assert_eq!(order, vec!["fast", "mid", "slow"]);
    }

    #[test]
    fn csv_export() {
        let subs = submissions();
        let text = render_csv(&subs).unwrap();
        assert_eq!(
            text,
            "=== Decoded CSV (for export) ===\n\n\
             # Submission 1 - X\n\
             rank,number,initials,object\n\
             1,002,bbb,X\n\
             2,001,aaa,X\n\
             \n\
             # Submission 2 - X\n\
             rank,number,initials,object\n\
             1,001,aaa,X\n\
             2,002,bbb,X\n\
             \n"
        );
    }

    #[test]
    fn full_report_sections_in_order() {
        let subs = submissions();
        let agg = aggregate(&subs);
        let text = render_report(&subs, &agg).unwrap();
        let listing = text.find("=== Decoded Rankings").unwrap();
        let board = text.find("=== Aggregated Statistics: X").unwrap();
        let csv = text.find("=== Decoded CSV").unwrap();
        assert!(listing < board && board < csv);
    }
}
