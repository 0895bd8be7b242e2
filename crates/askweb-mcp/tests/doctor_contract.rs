const KEY_VARS: [&str; 6] = [
    "ASKWEB_FIRECRAWL_API_KEY",
    "FIRECRAWL_API_KEY",
    "ASKWEB_TAVILY_API_KEY",
    "TAVILY_API_KEY",
    "ASKWEB_OPENAI_API_KEY",
    "OPENAI_API_KEY",
];

#[test]
fn askweb_doctor_reports_keys_without_printing_them() {
    let bin = assert_cmd::cargo::cargo_bin!("askweb");

    let mut cmd = std::process::Command::new(bin);
    cmd.args(["doctor"])
        .env("ASKWEB_DOTENV", "0")
        .env_remove("ASKWEB_ENV_FILE");
    // Ensure we don't accidentally inherit keys from the environment.
    for k in KEY_VARS {
        cmd.env_remove(k);
    }
    cmd.env("OPENAI_API_KEY", "sk-should-never-be-printed");
    let out = cmd.output().expect("run askweb doctor");

    assert!(out.status.success(), "askweb doctor failed");
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(!s.contains("sk-should-never-be-printed"));
    let v: serde_json::Value = serde_json::from_str(&s).expect("parse doctor json");

    assert_eq!(v["schema_version"].as_u64(), Some(1));
    assert_eq!(v["name"].as_str(), Some("askweb"));
    assert!(v.get("elapsed_ms").is_some());
    assert_eq!(
        v["features"]["stdio"].as_bool(),
        Some(cfg!(feature = "stdio"))
    );

    assert_eq!(v["configured"]["providers"]["firecrawl"].as_bool(), Some(false));
    assert_eq!(v["configured"]["providers"]["tavily"].as_bool(), Some(false));
    assert_eq!(v["configured"]["llm"]["openai"].as_bool(), Some(true));
    assert_eq!(v["configured"]["llm"]["model"].as_str(), Some("gpt-4o-mini"));
    assert_eq!(v["ok"].as_bool(), Some(false));

    let checks = v["checks"].as_array().expect("checks array");
    let firecrawl = checks
        .iter()
        .find(|c| c["name"].as_str() == Some("firecrawl_api_key"))
        .expect("firecrawl_api_key check");
    assert_eq!(firecrawl["ok"].as_bool(), Some(false));
    assert!(firecrawl["hint"].as_str().unwrap_or("").contains("FIRECRAWL_API_KEY"));

    let tool = checks
        .iter()
        .find(|c| c["name"].as_str() == Some("search_web_tool"))
        .expect("search_web_tool check");
    assert_eq!(tool["ok"].as_bool(), Some(true));
    assert_eq!(tool["tools"], serde_json::json!(["search_web"]));
}

#[test]
fn askweb_doctor_is_ok_when_every_key_is_set() {
    let bin = assert_cmd::cargo::cargo_bin!("askweb");
    let mut cmd = std::process::Command::new(bin);
    cmd.args(["doctor", "--output", "text"])
        .env("ASKWEB_DOTENV", "0")
        .env_remove("ASKWEB_ENV_FILE");
    for k in KEY_VARS {
        cmd.env_remove(k);
    }
    cmd.env("ASKWEB_FIRECRAWL_API_KEY", "fc-test")
        .env("TAVILY_API_KEY", "tvly-test")
        .env("OPENAI_API_KEY", "sk-test");
    let out = cmd.output().expect("run askweb doctor");

    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.contains("(ok=true)"), "unexpected doctor text: {s}");
    assert!(s.contains("- search_web_tool: ok"));
}
