use std::time::{Duration, Instant};

use chrono::Utc;
use rand::seq::SliceRandom;

use crate::application::errors::CommandError;
use crate::domain::entities::{Command, CommandRegistry};

const JOKES: [&str; 5] = [
    "😄 Why did the scarecrow win an award? Because he was outstanding in his field!",
    "😂 What do you call a fake noodle? An impasta!",
    "😆 Why don't scientists trust atoms? Because they make up everything!",
    "🤣 What did the ocean say to the beach? Nothing, it just waved!",
    "😅 Why don't eggs tell jokes? They'd crack each other up!",
];

const QUOTES: [&str; 5] = [
    "✨ \"The best time to plant a tree was 20 years ago. The second best time is now.\" - Chinese Proverb",
    "🌟 \"Your time is limited, don't waste it living someone else's life.\" - Steve Jobs",
    "💪 \"The only way to do great work is to love what you do.\" - Steve Jobs",
    "🎯 \"Success is not final, failure is not fatal.\" - Winston Churchill",
    "🚀 \"Believe you can and you're halfway there.\" - Theodore Roosevelt",
];

/// Builds the command registry before the dispatcher starts serving
pub struct CommandService {
    registry: CommandRegistry,
    started: Instant,
}

impl CommandService {
    pub fn new() -> Self {
        Self {
            registry: CommandRegistry::new(),
            started: Instant::now(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        self.register(Command::new("/ping", |_| Ok(format!("PONG - {}", Utc::now().to_rfc3339())))
            .with_description("Check if bot is alive"));

        self.register(Command::new("/time", |_| Ok(Utc::now().to_rfc2822()))
            .with_description("Get current time"));

        self.register(Command::new("/echo", |ctx| {
            if ctx.args.is_empty() {
                return Err(CommandError::InvalidArgs("Usage: /echo <text>".to_string()));
            }
            Ok(format!("📢 {}", ctx.args.join(" ")))
        })
            .with_description("Echo your message")
            .with_usage("/echo <text>"));

        self.register(Command::new("/info", |ctx| {
            Ok(format!(
                "👤 *Your Chat Info:*\n\nJID: {}\nUser: {}",
                ctx.sender,
                ctx.sender.localpart()
            ))
        })
            .with_description("Get your chat info"));

        self.register(Command::new("/joke", |_| Ok(pick(&JOKES).to_string()))
            .with_description("Get a random joke"));

        self.register(Command::new("/quote", |_| Ok(pick(&QUOTES).to_string()))
            .with_description("Get an inspirational quote"));

        let started = self.started;
        self.register(Command::new("/status", move |_| {
            Ok(format!(
                "🟢 *Bot Status*\nUptime: {}\nVersion: {}",
                format_uptime(started.elapsed()),
                env!("CARGO_PKG_VERSION")
            ))
        })
            .with_description("Get bot status"));
    }

    /// Finish registration. Adds `/help` listing everything registered so far,
    /// unless a `/help` was registered explicitly.
    pub fn build(mut self) -> CommandRegistry {
        if !self.registry.contains("/help") {
            let help = self.help_text();
            self.register(Command::new("/help", move |_| Ok(help.clone()))
                .with_description("Show this help message"));
        }
        self.registry
    }

    fn help_text(&self) -> String {
        let mut help = "🤖 *Bot Commands:*\n\n/help - Show this help message\n".to_string();
        for cmd in self.registry.all() {
            help.push_str(&format!("{} - {}\n", cmd.name, cmd.description));
        }
        help.push_str("\nSend any message to interact with the bot!");
        help
    }
}

impl Default for CommandService {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(items: &[&'static str]) -> &'static str {
    items.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CommandContext, SenderId};

    fn registry() -> CommandRegistry {
        let mut service = CommandService::new();
        service.register_defaults();
        service.build()
    }

    fn run(registry: &CommandRegistry, name: &str, args: &[&str]) -> Result<String, CommandError> {
        let ctx = CommandContext::new(
            args.iter().map(|s| s.to_string()).collect(),
            SenderId::parse("6281234567@s.whatsapp.net").unwrap(),
        );
        registry.get(name).unwrap().execute(&ctx)
    }

    #[test]
    fn test_defaults_registered() {
        let registry = registry();
        for name in ["/help", "/ping", "/time", "/echo", "/info", "/joke", "/quote", "/status"] {
            assert!(registry.contains(name), "{} missing", name);
        }
    }

    #[test]
    fn test_help_lists_commands_sorted() {
        let help = run(&registry(), "/help", &[]).unwrap();
        assert!(help.starts_with("🤖 *Bot Commands:*"));
        let echo = help.find("/echo - Echo your message").unwrap();
        let ping = help.find("/ping - Check if bot is alive").unwrap();
        assert!(echo < ping);
        assert_eq!(help.matches("/help").count(), 1);
    }

    #[test]
    fn test_ping_and_echo() {
        let registry = registry();
        assert!(run(&registry, "/ping", &[]).unwrap().starts_with("PONG - "));
        assert_eq!(run(&registry, "/echo", &["Hello", "World"]).unwrap(), "📢 Hello World");
        assert!(matches!(run(&registry, "/echo", &[]), Err(CommandError::InvalidArgs(_))));
    }

    #[test]
    fn test_info_shows_sender() {
        let info = run(&registry(), "/info", &[]).unwrap();
        assert!(info.contains("JID: 6281234567@s.whatsapp.net"));
        assert!(info.ends_with("User: 6281234567"));
    }

    #[test]
    fn test_random_picks_from_fixed_sets() {
        let registry = registry();
        assert!(JOKES.contains(&run(&registry, "/joke", &[]).unwrap().as_str()));
        assert!(QUOTES.contains(&run(&registry, "/quote", &[]).unwrap().as_str()));
    }

    #[test]
    fn test_explicit_help_kept() {
        let mut service = CommandService::new();
        service.register(Command::new("/help", |_| Ok("custom".to_string())));
        let registry = service.build();
        assert_eq!(run(&registry, "/help", &[]).unwrap(), "custom");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(5)), "5s");
        assert_eq!(format_uptime(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_uptime(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
