//! `crew` command: who is aboard the station right now.

use orbtrack::config::ConfigFile;
use orbtrack::source::{build_client, iss_crew, CrewMember, CrewSource, OpenNotifyCrewSource};

use crate::error::CliError;
use crate::runner::build_runtime;

pub fn run() -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let client = build_client(config.request_timeout())?;
    let source = OpenNotifyCrewSource::new(client, &config.tracking.crew_url);

    let runtime = build_runtime()?;
    let people = runtime.block_on(source.fetch_crew())?;

    print!("{}", render_crew(&iss_crew(people)));
    Ok(())
}

fn render_crew(crew: &[CrewMember]) -> String {
    if crew.is_empty() {
        return "Nobody is listed aboard the ISS right now.\n".to_string();
    }

    let mut out = format!("{} people aboard the ISS:\n", crew.len());
    for member in crew {
        out.push_str(&format!("  - {}\n", member.name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str) -> CrewMember {
        CrewMember {
            name: name.to_string(),
            craft: "ISS".to_string(),
        }
    }

    #[test]
    fn test_render_crew_lists_names() {
        let text = render_crew(&[member("Sunita Williams"), member("Butch Wilmore")]);
        assert_eq!(
            text,
            "2 people aboard the ISS:\n  - Sunita Williams\n  - Butch Wilmore\n"
        );
    }

    #[test]
    fn test_render_empty_crew() {
        assert!(render_crew(&[]).starts_with("Nobody"));
    }
}
