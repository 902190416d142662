use anyhow::Context;
use capstan::mcp::runtime::LocalRuntime;
use capstan::{
    logging, register_provider, ArgumentMap, CapabilityProvider, Config, Declarations, Param, PromptArg, PromptMeta,
    Property, ResourceMeta, ToolMeta,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

struct ExampleServer;

impl ExampleServer {
    fn echo(&self, message: String) -> String { format!("Echo: {message}") }

    fn add(&self, a: f64, b: f64) -> f64 { a + b }

    fn greet(&self, name: String, title: Option<String>) -> String {
        match title.filter(|t| !t.is_empty()) {
            Some(title) => format!("Hello, {title} {name}!"),
            None => format!("Hello, {name}!"),
        }
    }

    fn validate_email(&self, email: String) -> Value {
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.rsplit_once('.').map(|(host, tld)| !host.is_empty() && tld.len() >= 2).unwrap_or(false)
            }
            None => false,
        };
        json!({
            "email": email,
            "isValid": valid,
            "message": if valid { "Valid email format" } else { "Invalid email format" },
        })
    }

    fn server_status(&self) -> Value {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default();
        json!({"status": "running", "timestamp": now, "version": "1.0.0", "uptime": "N/A"})
    }

    fn system_info(&self) -> Value {
        json!({
            "crateVersion": env!("CARGO_PKG_VERSION"),
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "family": std::env::consts::FAMILY,
        })
    }

    fn code_review(&self, language: String, focus_area: Option<String>) -> String {
        let focus = focus_area.filter(|f| !f.is_empty());
        let mut prompt = format!("Please review the following {language} code");
        if let Some(f) = &focus {
            prompt.push_str(&format!(" with a focus on {f}"));
        }
        prompt.push_str(".\n\nProvide feedback on:\n");
        prompt.push_str("- Code quality and readability\n");
        prompt.push_str("- Best practices and conventions\n");
        prompt.push_str("- Potential bugs or issues\n");
        if let Some(f) = focus {
            let mut chars = f.chars();
            let capitalized: String = chars.next().map(|c| c.to_uppercase().chain(chars).collect()).unwrap_or_default();
            prompt.push_str(&format!("- {capitalized} considerations\n"));
        }
        prompt
    }

    fn generate_docs(&self, kind: String, audience: String, format: Option<String>) -> String {
        let format = format.filter(|f| !f.is_empty()).unwrap_or_else(|| "markdown".to_string());
        format!(
            "Generate {kind} documentation for {audience}.\n\nRequirements:\n- Clear and concise language\n- Include examples where appropriate\n- Format: {format}\n- Target audience: {audience}\n\nPlease ensure the documentation is comprehensive and easy to understand."
        )
    }
}

impl CapabilityProvider for ExampleServer {
    fn declare(decl: &mut Declarations<Self>) {
        decl.method("echo", Self::echo)
            .tool(ToolMeta::new().description("Echoes back the provided message"))
            .param(Param::new("message").property(Property::new().description("The message to echo back")));

        decl.method("add", Self::add)
            .tool(ToolMeta::new().description("Adds two numbers together"))
            .param(Param::new("a").property(Property::new().description("First number")))
            .param(Param::new("b").property(Property::new().description("Second number")));

        decl.method("greet", Self::greet)
            .tool(ToolMeta::new().description("Generates a personalized greeting message"))
            .param(Param::new("name").property(Property::new().description("Name of the person to greet")))
            .param(Param::new("title").property(Property::new().description("Optional title (e.g., Mr., Dr.)").optional()));

        decl.method("validateEmail", Self::validate_email)
            .tool(ToolMeta::new().name("validate_email").description("Validates if a string is a properly formatted email address"))
            .param(Param::new("email").property(Property::new().description("Email address to validate").format("email")));

        decl.method("serverStatus", Self::server_status).resource(
            ResourceMeta::new("status://server")
                .title("Server Status")
                .description("Current status and information about the MCP server")
                .mime_type("application/json"),
        );

        decl.method("systemInfo", Self::system_info).resource(
            ResourceMeta::new("system://info")
                .title("System Information")
                .description("Information about the host environment")
                .mime_type("application/json"),
        );

        decl.method("codeReview", Self::code_review)
            .prompt(
                PromptMeta::new()
                    .name("code_review")
                    .title("Code Review Prompt")
                    .description("Generates a prompt for reviewing code with specific focus areas"),
            )
            .param(Param::new("language").prompt_arg(PromptArg::new().description("Programming language of the code")))
            .param(
                Param::new("focusArea")
                    .prompt_arg(PromptArg::new().description("Specific area to focus on (e.g., security, performance)").optional()),
            );

        decl.method("generateDocs", Self::generate_docs)
            .prompt(
                PromptMeta::new()
                    .name("generate_docs")
                    .title("Documentation Generator")
                    .description("Generates a prompt for creating documentation"),
            )
            .param(Param::new("type").prompt_arg(PromptArg::new().description("Type of documentation (API, user guide, etc.)")))
            .param(Param::new("audience").prompt_arg(PromptArg::new().description("Target audience (developers, end-users, etc.)")))
            .param(Param::new("format").prompt_arg(PromptArg::new().description("Output format (markdown, HTML, etc.)").optional()));
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--config" {
            i += 1;
            if i >= args.len() { eprintln!("--config requires a path"); std::process::exit(2); }
            config_path = Some(PathBuf::from(&args[i]));
        }
        i += 1;
    }

    let cfg = match config_path {
        Some(path) => Config::load(&path).context("loading config")?,
        None => Config::default(),
    };

    let mut runtime = LocalRuntime::new();
    let caps = register_provider(Arc::new(ExampleServer), &cfg, &mut runtime)?;
    info!(server = %caps.info.name, tools = caps.tools.len(), resources = caps.resources.len(), prompts = caps.prompts.len(), "example server ready");

    let listing = json!({
        "serverInfo": caps.info,
        "capabilities": caps.advertised,
        "tools": runtime.list_tools(),
        "resources": runtime.list_resources(),
        "prompts": runtime.list_prompts(),
    });
    println!("{}", serde_json::to_string_pretty(&listing)?);

    let mut call = ArgumentMap::new();
    call.insert("message".into(), json!("Hello"));
    let result = runtime.call_tool("echo", &call)?;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
