//! `postAttachCommand` planning and rendering

/// One step of the attach-time shell chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupStage {
    /// Output silenced and sent to the background; `detach` wraps it in `nohup`
    Background { command: String, detach: bool },
    /// Intermediate step, chained to the next with `&&`
    Foreground(String),
    /// The process the attached terminal stays on
    ForegroundTerminal(String),
    /// Keep the shell alive on background jobs
    WaitForever,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartupInputs {
    pub has_setup_script: bool,
    pub has_external_app: bool,
    pub wants_browser: bool,
}

pub const GUIDE_SERVER: &str = "npm run start:tutorial";
pub const LIVE_PREVIEW: &str = "live-server --port=8080 --no-browser";
pub const APP_START: &str = "npm start";

pub fn plan_startup(inputs: StartupInputs) -> Vec<StartupStage> {
    let mut plan = vec![StartupStage::Background {
        command: GUIDE_SERVER.to_string(),
        detach: true,
    }];

    if inputs.has_setup_script {
        plan.push(StartupStage::Foreground("echo ''".to_string()));
        plan.push(StartupStage::Foreground("cd project".to_string()));
        plan.push(StartupStage::Foreground("node setup-project.js".to_string()));
    } else if inputs.has_external_app {
        plan.push(StartupStage::Foreground("cd project".to_string()));
    }

    if inputs.has_external_app {
        plan.push(StartupStage::ForegroundTerminal(APP_START.to_string()));
    } else if inputs.wants_browser {
        // with a setup script the browser fallback is skipped and the
        // terminal stays on the script
        if !inputs.has_setup_script {
            plan.push(StartupStage::Background {
                command: LIVE_PREVIEW.to_string(),
                detach: false,
            });
            plan.push(StartupStage::WaitForever);
        }
    } else {
        plan.push(StartupStage::WaitForever);
    }

    plan
}

/// Render a plan into a single shell line.
///
/// Background stages end in `& `, consecutive foreground stages are joined
/// with ` && `, and the result never ends in an operator.
pub fn render_chain(plan: &[StartupStage]) -> String {
    let mut chain = String::new();
    let mut after_foreground = false;

    for stage in plan {
        if after_foreground {
            chain.push_str(" && ");
        }
        match stage {
            StartupStage::Background { command, detach } => {
                if *detach {
                    chain.push_str("nohup ");
                }
                chain.push_str(command);
                chain.push_str(" > /dev/null 2>&1 & ");
                after_foreground = false;
            }
            StartupStage::Foreground(command) | StartupStage::ForegroundTerminal(command) => {
                chain.push_str(command);
                after_foreground = true;
            }
            StartupStage::WaitForever => {
                chain.push_str("wait");
                after_foreground = true;
            }
        }
    }

    chain.trim_end().to_string()
}
