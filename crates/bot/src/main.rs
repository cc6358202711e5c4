mod client;
mod commands;
mod render;
mod telegram;

use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client::ClubClient;
use commands::Command;
use telegram::{Message, TelegramClient};

struct Bot {
    telegram: TelegramClient,
    club: ClubClient,
    frontend_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let token = std::env::var("BOT_TOKEN")?;
    let backend_url = std::env::var("BACKEND_URL")
        .unwrap_or_else(|_| "http://localhost:8080".into());
    let frontend_url = std::env::var("FRONTEND_URL")
        .unwrap_or_else(|_| backend_url.clone());

    // One pool for both endpoints; the timeout must outlast the 30 s
    // long-poll hold.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(35))
        .build()?;

    let bot = Bot {
        telegram: TelegramClient::new(http.clone(), &token),
        club: ClubClient::new(http, backend_url),
        frontend_url,
    };

    tracing::info!("Bot is polling for updates");
    poll_updates(&bot).await
}

/// The long-poll loop: every iteration is an ordinary synchronous request
/// into the club service; errors back off and the loop keeps going.
async fn poll_updates(bot: &Bot) -> Result<()> {
    let mut offset = 0i64;

    loop {
        match bot.telegram.get_updates(offset, 30).await {
            Ok(updates) => {
                for update in updates {
                    offset = update.update_id + 1;

                    let Some(message) = update.message else {
                        continue;
                    };
                    if let Err(err) = handle_message(bot, &message).await {
                        tracing::error!("failed to handle message: {err:#}");
                    }
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(err) => {
                tracing::error!("polling error: {err:#}");
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}

async fn handle_message(bot: &Bot, message: &Message) -> Result<()> {
    let chat_id = message.chat.id;
    let text = message.text.as_deref().unwrap_or("");

    match Command::parse(text) {
        Some(command) => dispatch(bot, command, chat_id, message).await,
        None => {
            bot.telegram
                .send_message(chat_id, render::unknown_command(), Some(&render::main_menu()))
                .await
        }
    }
}

async fn dispatch(bot: &Bot, command: Command, chat_id: i64, message: &Message) -> Result<()> {
    match command {
        Command::Start => {
            let first_name = message
                .from
                .as_ref()
                .and_then(|s| s.first_name.as_deref())
                .unwrap_or("player");
            let text = render::welcome(first_name, &bot.frontend_url);
            bot.telegram
                .send_message(chat_id, &text, Some(&render::main_menu()))
                .await
        }
        Command::Help => {
            let text = render::help(&bot.frontend_url);
            bot.telegram
                .send_message(chat_id, &text, Some(&render::main_menu()))
                .await
        }
        Command::Tournaments => {
            let text = render::tournaments_intro(&bot.frontend_url);
            bot.telegram
                .send_message(chat_id, &text, Some(&render::tournaments_menu()))
                .await
        }
        Command::ActiveTournaments => {
            let text = match bot.club.list_tournaments().await {
                Ok(tournaments) => render::active_tournaments(&tournaments, &bot.frontend_url),
                Err(err) => {
                    tracing::error!("failed to load tournaments: {err:#}");
                    "Could not load tournaments, try again later.".to_string()
                }
            };
            bot.telegram
                .send_message(chat_id, &text, Some(&render::tournaments_menu()))
                .await
        }
        Command::Rating => {
            let text = match bot.club.rating().await {
                Ok(entries) => render::rating_table(&entries),
                Err(err) => {
                    tracing::error!("failed to load rating: {err:#}");
                    "Could not load the rating, try again later.".to_string()
                }
            };
            bot.telegram
                .send_message(chat_id, &text, Some(&render::main_menu()))
                .await
        }
        Command::Profile => {
            let text = profile_text(bot, message).await;
            bot.telegram
                .send_message(chat_id, &text, Some(&render::main_menu()))
                .await
        }
        Command::MyRegistrations => {
            let text = my_registrations_text(bot, message).await;
            bot.telegram
                .send_message(chat_id, &text, Some(&render::tournaments_menu()))
                .await
        }
        Command::Back => {
            bot.telegram
                .send_message(chat_id, "Main menu", Some(&render::main_menu()))
                .await
        }
    }
}

async fn profile_text(bot: &Bot, message: &Message) -> String {
    let Some(username) = message.from.as_ref().and_then(|s| s.username.as_deref()) else {
        return "You need a Telegram username to view your profile.".to_string();
    };

    match bot.club.profile_by_telegram(username).await {
        Ok(Some(profile)) => render::profile(&profile),
        Ok(None) => "Profile not found. You may not be registered with the club yet.".to_string(),
        Err(err) => {
            tracing::error!("failed to load profile: {err:#}");
            "Could not load your profile, try again later.".to_string()
        }
    }
}

/// Membership is tested through the tournament detail's player list, the
/// same read the web front-end uses.
async fn my_registrations_text(bot: &Bot, message: &Message) -> String {
    let Some(username) = message.from.as_ref().and_then(|s| s.username.as_deref()) else {
        return "You need a Telegram username to view your registrations.".to_string();
    };

    let tournaments = match bot.club.list_tournaments().await {
        Ok(tournaments) => tournaments,
        Err(err) => {
            tracing::error!("failed to load tournaments: {err:#}");
            return "Could not load registrations, try again later.".to_string();
        }
    };

    let mut mine = Vec::new();
    for summary in tournaments {
        match bot.club.tournament_detail(summary.id).await {
            Ok(detail) => {
                let registered = detail
                    .players
                    .iter()
                    .any(|p| p.telegram_username.as_deref() == Some(username));
                if registered {
                    mine.push(detail);
                }
            }
            Err(err) => {
                tracing::warn!("skipping tournament {}: {err:#}", summary.id);
            }
        }
    }

    render::my_registrations(&mine, &bot.frontend_url)
}
