//! 管理控制台主入口

use anyhow::Result;
use clap::{Parser, Subcommand};

use basecamp_console::client::AuthSessionClient;
use basecamp_console::config::AppConfig;
use basecamp_console::health::BackendAvailability;
use basecamp_console::models::auth::Credentials;
use basecamp_console::telemetry;

#[derive(Parser)]
#[command(
    name = "basecamp-console",
    version,
    about = "营地后台管理控制台",
    long_about = "与远端认证/管理服务交互的命令行控制台。\n所有配置通过 BASECAMP_ 前缀的环境变量完成。"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 登录并持久化会话
    Login {
        /// 管理员用户名
        #[arg(short, long)]
        username: String,
        /// 管理员密码；省略时交互输入
        #[arg(short, long)]
        password: Option<String>,
    },
    /// 清除本地会话并通知远端
    Logout,
    /// 显示本地会话状态（不访问网络）
    Status,
    /// 获取仪表盘概览
    Dashboard,
    /// 获取管理员资料
    Profile,
    /// 探测后端可达性
    Health,
    /// 发送重置密码邮件
    ForgotPassword {
        /// 注册邮箱
        #[arg(short, long)]
        email: String,
    },
    /// 用重置令牌设置新密码
    ResetPassword {
        /// 邮件中的重置令牌
        #[arg(short, long)]
        token: String,
        /// 新密码
        #[arg(short, long)]
        new_password: String,
    },
    /// 校验重置令牌是否仍然有效
    ValidateResetToken {
        /// 邮件中的重置令牌
        #[arg(short, long)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.local > .env.development > .env
    // 生产环境应该直接设置环境变量，不依赖 .env 文件
    if let Ok(profile) = std::env::var("BASECAMP_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    // 加载配置并初始化日志
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;
    telemetry::init_telemetry(&config);

    let client = AuthSessionClient::new(&config);

    match cli.command {
        Command::Login { username, password } => run_login(&client, username, password).await,
        Command::Logout => run_logout(&client).await,
        Command::Status => run_status(&client),
        Command::Dashboard => run_dashboard(&client).await,
        Command::Profile => run_profile(&client).await,
        Command::Health => run_health(&client).await,
        Command::ForgotPassword { email } => run_forgot_password(&client, &email).await,
        Command::ResetPassword {
            token,
            new_password,
        } => run_reset_password(&client, &token, &new_password).await,
        Command::ValidateResetToken { token } => run_validate_reset_token(&client, &token).await,
    }
}

async fn run_login(
    client: &AuthSessionClient,
    username: String,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };
    let credentials = Credentials { username, password };

    match client.login(&credentials).await {
        Ok(envelope) if envelope.success => {
            match client.stored_user() {
                Some(session) => {
                    println!("Signed in as {} ({})", session.username, session.role)
                }
                None => println!("{}", envelope.message),
            }
            Ok(())
        }
        Ok(envelope) => anyhow::bail!("{}", envelope.message),
        Err(err) if err.is_retryable() => {
            // 单次失败不足以断定后端离线，用探测结果佐证
            let availability = BackendAvailability::from_probe(client.check_backend_health().await);
            anyhow::bail!("{} (backend {})", err.user_message(), availability)
        }
        Err(err) => anyhow::bail!("{}", err.user_message()),
    }
}

async fn run_logout(client: &AuthSessionClient) -> Result<()> {
    client
        .logout()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;
    println!("Signed out.");
    Ok(())
}

fn run_status(client: &AuthSessionClient) -> Result<()> {
    if !client.is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }

    match client.stored_user() {
        Some(session) => {
            println!("Signed in as {} <{}>", session.username, session.email);
            println!("Name: {}", session.full_name);
            println!("Role: {}", session.role);
        }
        None => println!("Token present but the stored user record is missing."),
    }
    Ok(())
}

async fn run_dashboard(client: &AuthSessionClient) -> Result<()> {
    let envelope = client
        .dashboard()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    match envelope.data {
        Some(summary) => {
            if !summary.welcome_message.is_empty() {
                println!("{}", summary.welcome_message);
            }
            println!("Bookings:       {}", summary.total_bookings);
            println!("Menu items:     {}", summary.total_menu_items);
            println!("Gallery images: {}", summary.total_gallery_images);
            println!("Blog posts:     {}", summary.total_blog_posts);
            if let Some(last_login) = summary.last_login {
                println!("Last login:     {}", last_login);
            }
        }
        None => println!("{}", envelope.message),
    }
    Ok(())
}

async fn run_profile(client: &AuthSessionClient) -> Result<()> {
    let envelope = client
        .profile()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    match envelope.data {
        Some(profile) => {
            println!("Username: {}", profile.username);
            println!("Email:    {}", profile.email);
            println!("Name:     {}", profile.full_name);
            println!("Role:     {}", profile.role);
            if let Some(created_at) = profile.created_at {
                println!("Created:  {}", created_at);
            }
            if let Some(last_login) = profile.last_login {
                println!("Last login: {}", last_login);
            }
        }
        None => println!("{}", envelope.message),
    }
    Ok(())
}

async fn run_health(client: &AuthSessionClient) -> Result<()> {
    println!("Backend: {}", BackendAvailability::Checking);
    let availability = BackendAvailability::from_probe(client.check_backend_health().await);
    println!("Backend: {}", availability);

    if !availability.is_online() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_forgot_password(client: &AuthSessionClient, email: &str) -> Result<()> {
    let envelope = client
        .forgot_password(email)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    if !envelope.success {
        anyhow::bail!("{}", envelope.message);
    }
    println!("{}", envelope.message);
    Ok(())
}

async fn run_reset_password(
    client: &AuthSessionClient,
    token: &str,
    new_password: &str,
) -> Result<()> {
    let envelope = client
        .reset_password(token, new_password)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    if !envelope.success {
        anyhow::bail!("{}", envelope.message);
    }
    println!("{}", envelope.message);
    Ok(())
}

async fn run_validate_reset_token(client: &AuthSessionClient, token: &str) -> Result<()> {
    let envelope = client
        .validate_reset_token(token)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    match envelope.data {
        Some(true) => println!("Reset token is valid."),
        Some(false) => {
            println!("Reset token is invalid or expired.");
            std::process::exit(1);
        }
        None => println!("{}", envelope.message),
    }
    Ok(())
}

/// 交互式读取密码
fn prompt_password() -> Result<String> {
    use std::io::Write;

    print!("Password: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
