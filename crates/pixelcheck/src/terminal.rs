use std::time::Duration;

pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

/// Print a single comparison result line.
pub fn print_line(name: &str, passed: bool, elapsed: Duration) {
    let time_suffix = format!("  \x1b[2m{}\x1b[0m", format_duration(elapsed));
    if passed {
        println!("  \x1b[32mPASS\x1b[0m  {name}{time_suffix}");
    } else {
        println!("  \x1b[31mFAIL\x1b[0m  {name}{time_suffix}");
    }
}

/// Print the names of failed comparisons together with their artifacts.
pub fn print_actionable_summary(failed: &[(String, Option<(String, String)>)]) {
    if failed.is_empty() {
        return;
    }

    println!();
    println!("Failed ({}):", failed.len());
    for (name, artifacts) in failed {
        println!("    {name}");
        if let Some((diff, out)) = artifacts {
            println!("      \x1b[2m{diff}  {out}\x1b[0m");
        }
    }
}

/// Print the final summary.
pub fn print_summary(total: usize, passed: usize, failures: usize, elapsed: Duration) {
    println!();
    println!(
        "Images:     {total} total, \x1b[32m{passed} passed\x1b[0m, \x1b[31m{} failed\x1b[0m",
        total - passed
    );
    println!("Failures:   {failures}");
    println!("Time:       {}", format_duration(elapsed));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_switch_to_seconds() {
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
    }
}
