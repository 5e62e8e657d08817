use crate::model::QaPairEvaluation;

/// Qualitative label for an average score.
fn performance_label(avg: f64) -> &'static str {
    if avg >= 4.0 {
        "Excellent"
    } else if avg >= 3.0 {
        "Good"
    } else if avg >= 2.0 {
        "Fair"
    } else {
        "Needs Improvement"
    }
}

/// Render the evaluation report as Markdown.
///
/// Pure function of its input: same evaluations and `generated_at` produce
/// byte-identical output, so the result is snapshot-testable. With no
/// evaluations the average and conclusion render as `N/A`, never as zero.
pub fn render_report(evaluations: &[QaPairEvaluation], generated_at: &str) -> String {
    let total = evaluations.len();
    let mut histogram = [0usize; 6];
    let mut sum: i64 = 0;
    for eval in evaluations {
        if (0..=5).contains(&eval.score) {
            histogram[eval.score as usize] += 1;
        }
        sum += eval.score;
    }
    let avg = if total > 0 {
        Some(sum as f64 / total as f64)
    } else {
        None
    };

    let mut report = String::new();
    report.push_str("# RAG System Evaluation Report\n\n");
    report.push_str(&format!("Generated: {generated_at}\n\n"));
    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Questions Tested:** {total}\n"));
    match avg {
        Some(avg) => report.push_str(&format!("- **Average Score:** {avg:.1}/5\n")),
        None => report.push_str("- **Average Score:** N/A\n"),
    }
    report.push_str("\n## Score Distribution\n\n");
    for score in (0..=5).rev() {
        report.push_str(&format!("- **{score}/5**: {} questions\n", histogram[score as usize]));
    }

    report.push_str("\n## Question Details\n\n");
    for (i, eval) in evaluations.iter().enumerate() {
        report.push_str("---\n");
        report.push_str(&format!("### Q{}: {}\n\n", i + 1, eval.question));
        report.push_str(&format!("**Score: {}/5**\n\n", eval.score));
        report.push_str(&format!("**Expected Answer:**\n> {}\n\n", eval.answer));
        report.push_str(&format!("**LLM Answer:**\n> {}\n\n", eval.llm_answer));
        report.push_str(&format!("**Judge Reasoning:**\n> {}\n\n", eval.reason));
    }

    report.push_str("## Conclusion\n\n");
    match avg {
        Some(avg) => report.push_str(&format!(
            "The RAG system performance is **{}** with an average score of {avg:.1}/5.\n",
            performance_label(avg)
        )),
        None => report.push_str("No evaluations were available; overall performance is **N/A**.\n"),
    }
    report
}
