//! Tests for selecting and merging mode variants.

use kiln_config::{
    ClientLogLevel, ConfigDiscovery, ConfigError, ConfigFile, Mode, PluginInvocation, Resolver,
    StatsPreset,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const PROJECT: &str = r#"
entry = "./src/index.js"
mode = "production"

[output]
path = "dist"
filename = "bundle.[hash].js"
public_path = "/"

[resolve]
modules = ["./src/components", "node_modules"]
extensions = ["web.js", ".js"]

[resolve.alias]
react-native = "@my/react-native-web"

[[module.rules]]
test = '\.js$'
use = "babel-loader"
exclude = "node_modules"

[[plugins]]
plugin = "html"
template = "./public/index.html"

[variants.development]
mode = "development"
devtool = "cheap-module-eval-source-map"

[variants.development.dev_server]
port = "3000"
hot = true
stats = "errors-only"

[[variants.development.plugins]]
plugin = "hot-module-replacement"

[variants.production]
"#;

fn project() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("kiln.toml"), PROJECT).expect("write config");
    fs::create_dir_all(dir.path().join("src")).expect("create src");
    fs::write(dir.path().join("src/index.js"), "export {};").expect("write entry");
    fs::create_dir_all(dir.path().join("public")).expect("create public");
    fs::write(dir.path().join("public/index.html"), "<div id=\"root\"></div>")
        .expect("write template");
    dir
}

#[test]
fn every_mode_yields_entry_and_output() {
    let dir = project();
    let file = ConfigDiscovery::new(dir.path()).load().expect("load config");
    let resolver = Resolver::new(dir.path());

    for mode in Mode::ALL {
        let config = resolver.resolve(&file, mode).expect("resolve");
        assert!(!config.entry.is_empty(), "{mode} has no entry");
        assert!(!config.output.path.as_os_str().is_empty(), "{mode} has no output path");
        assert!(!config.output.filename.as_str().is_empty(), "{mode} has no output filename");
        assert_eq!(config.mode, mode);
    }
}

#[test]
fn development_sets_hot_reload_and_keeps_alias() {
    let file = ConfigFile::from_value(json!({
        "entry": "./src/index.js",
        "mode": "production",
        "resolve": { "alias": { "react-native": "@my/react-native-web" } },
        "variants": {
            "development": { "mode": "development", "dev_server": { "hot": true } }
        }
    }))
    .expect("config");

    let merged = file.merged(Mode::Development).expect("merge");
    assert_eq!(
        merged,
        json!({
            "entry": "./src/index.js",
            "mode": "development",
            "resolve": { "alias": { "react-native": "@my/react-native-web" } },
            "dev_server": { "hot": true }
        })
    );

    let config = file.resolve(Mode::Development).expect("resolve");
    assert!(config.hot_reload());
    assert_eq!(config.mode, Mode::Development);
    assert_eq!(
        config.resolve.alias.get("react-native").map(String::as_str),
        Some("@my/react-native-web")
    );
}

#[test]
fn production_keeps_base_values() {
    let dir = project();
    let file = ConfigDiscovery::new(dir.path()).load().expect("load config");
    let config = Resolver::new(dir.path())
        .resolve(&file, Mode::Production)
        .expect("resolve");

    assert!(config.dev_server.is_none());
    assert!(!config.hot_reload());
    assert!(config.devtool.is_none());
    assert_eq!(config.plugins.len(), 1);
}

#[test]
fn development_appends_plugins_and_reads_dev_server() {
    let dir = project();
    let file = ConfigDiscovery::new(dir.path()).load().expect("load config");
    let config = Resolver::new(dir.path())
        .resolve(&file, Mode::Development)
        .expect("resolve");

    let kinds: Vec<_> = config.plugins.iter().map(|p| p.kind()).collect();
    assert_eq!(kinds, vec!["html", "hot-module-replacement"]);

    let dev = config.dev_server.as_ref().expect("dev server");
    assert_eq!(dev.port, 3000);
    assert_eq!(config.devtool.as_deref(), Some("cheap-module-eval-source-map"));
}

#[test]
fn staging_is_not_a_mode() {
    let dir = project();
    let file = ConfigDiscovery::new(dir.path()).load().expect("load config");

    let err = Resolver::new(dir.path())
        .resolve_named(&file, "staging")
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownMode(_)));

    let err = "staging".parse::<Mode>().unwrap_err();
    assert!(err.to_string().contains("staging"));
}

#[test]
fn mode_names_are_case_insensitive() {
    assert_eq!("Development".parse::<Mode>().unwrap(), Mode::Development);
    assert_eq!(" production ".parse::<Mode>().unwrap(), Mode::Production);
}

#[test]
fn undeclared_variant_is_missing() {
    let file = ConfigFile::from_value(json!({
        "entry": "./src/index.js",
        "variants": { "development": {} }
    }))
    .expect("config");

    let err = file.resolve(Mode::Production).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingVariant {
            mode: Mode::Production
        }
    ));
}

#[test]
fn resolved_config_serializes_back_to_json() {
    let dir = project();
    let file = ConfigDiscovery::new(dir.path()).load().expect("load config");
    let config = Resolver::new(dir.path())
        .resolve(&file, Mode::Development)
        .expect("resolve");

    let value = config.to_value().expect("to value");
    assert_eq!(value["mode"], json!("development"));
    assert_eq!(value["output"]["filename"], json!("bundle.[hash].js"));
    assert_eq!(value["plugins"][1], json!({ "plugin": "hot-module-replacement" }));
}

#[test]
fn camel_case_dev_server_variant_merges_onto_base() {
    let file = ConfigFile::from_value(json!({
        "entry": "./src/index.js",
        "mode": "production",
        "resolve": { "alias": { "react-native": "@my/react-native-web" } },
        "variants": {
            "development": { "mode": "development", "devServer": { "hot": true } }
        }
    }))
    .expect("config");

    let merged = file.merged(Mode::Development).expect("merge");
    assert_eq!(merged["devServer"], json!({ "hot": true }));
    assert_eq!(merged["resolve"]["alias"]["react-native"], json!("@my/react-native-web"));

    let config = file.resolve(Mode::Development).expect("resolve");
    assert_eq!(config.mode, Mode::Development);
    assert!(config.dev_server.as_ref().is_some_and(|dev| dev.hot));
}

/// Base and development layers written the way a webpack project spells them.
fn webpack_style() -> ConfigFile {
    ConfigFile::from_value(json!({
        "entry": "./src/index.js",
        "output": {
            "path": "dist",
            "filename": "bundle.[hash].js",
            "publicPath": "/"
        },
        "mode": "production",
        "devServer": {
            "hot": true,
            "port": "3000",
            "quiet": false,
            "inline": true,
            "stats": "errors-only",
            "overlay": false,
            "clientLogLevel": "silent",
            "compress": true
        },
        "resolve": {
            "modules": ["./src/components", "node_modules"],
            "alias": { "react-native": "@my/react-native-web" },
            "extensions": ["web.js", ".js"]
        },
        "module": {
            "rules": [
                {
                    "test": "/\\.jsx?$/",
                    "use": {
                        "loader": "babel-loader",
                        "options": { "presets": ["@babel/preset-env"] }
                    },
                    "exclude": "/node_modules/"
                },
                {
                    "test": "/\\.(le|c)ss$/",
                    "use": ["css-loader", "postcss-loader", "less-loader"],
                    "exclude": "/node_modules/"
                }
            ]
        },
        "plugins": [
            {
                "plugin": "html",
                "template": "./public/index.html",
                "filename": "index.html",
                "minify": { "removeAttributeQuotes": false, "collapseWhitespace": false }
            },
            { "plugin": "clean", "cleanOnceBeforeBuildPatterns": ["**/*", "!dll", "!dll/**"] },
            {
                "plugin": "copy",
                "patterns": [{ "from": "public/js/*.js", "to": "dist/js", "flatten": true }],
                "ignore": ["other.js"]
            },
            {
                "plugin": "provide",
                "symbols": {
                    "React": "react",
                    "Component": ["react", "Component"],
                    "$": "jquery",
                    "_map": ["lodash", "map"]
                }
            },
            { "plugin": "css-extract", "filename": "css/[name].css" },
            { "plugin": "optimize-css" },
            { "plugin": "hot-module-replacement" }
        ],
        "variants": {
            "production": {},
            "development": {
                "mode": "development",
                "devServer": {
                    "port": "3000",
                    "hot": true,
                    "proxy": {
                        "/api": {
                            "target": "http://localhost:4000",
                            "pathRewrite": { "/api": "" }
                        }
                    }
                },
                "plugins": [
                    { "plugin": "hot-module-replacement" },
                    {
                        "plugin": "define",
                        "constants": { "DEV": "\"development\"", "FLAG": "true" }
                    }
                ]
            }
        }
    }))
    .expect("config")
}

#[test]
fn webpack_style_development_config_resolves() {
    let config = webpack_style().resolve(Mode::Development).expect("resolve");

    let dev = config.dev_server.as_ref().expect("dev server");
    assert_eq!(dev.port, 3000);
    assert!(dev.compress);
    assert_eq!(dev.stats, StatsPreset::ErrorsOnly);
    assert_eq!(dev.client_log_level, ClientLogLevel::Silent);

    let (prefix, rule) = dev.proxy_for("/api/users").expect("proxy rule");
    assert_eq!(prefix, "/api");
    assert_eq!(rule.rewrite("/api/users"), "/users");

    let clean = config
        .plugins
        .iter()
        .find_map(|plugin| match plugin {
            PluginInvocation::Clean(options) => Some(options),
            _ => None,
        })
        .expect("clean plugin");
    assert_eq!(
        clean.clean_once_before_build_patterns,
        vec!["**/*", "!dll", "!dll/**"]
    );

    let define = config
        .plugins
        .iter()
        .find_map(|plugin| match plugin {
            PluginInvocation::Define(options) => Some(options),
            _ => None,
        })
        .expect("define plugin");
    assert_eq!(define.constants["FLAG"], json!("true"));
    assert_eq!(define.constants["DEV"], json!("\"development\""));

    let kinds: Vec<_> = config.plugins.iter().map(|p| p.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "html",
            "clean",
            "copy",
            "provide",
            "css-extract",
            "optimize-css",
            "hot-module-replacement",
            "hot-module-replacement",
            "define"
        ]
    );
    assert_eq!(config.output.public_path, "/");
    assert_eq!(config.rules_for("src/App.jsx").count(), 1);
}

#[test]
fn webpack_style_production_keeps_base_dev_server() {
    let config = webpack_style().resolve(Mode::Production).expect("resolve");
    let dev = config.dev_server.expect("dev server");
    assert!(dev.proxy.is_empty());
    assert_eq!(config.plugins.len(), 7);
}

#[test]
fn misspelled_plugin_option_is_rejected() {
    let file = ConfigFile::from_value(json!({
        "entry": "./src/index.js",
        "plugins": [
            { "plugin": "html", "template": "./public/index.html" },
            { "plugin": "clean", "cleanOnceBeforeBuildPattern": ["**/*", "!dll"] }
        ],
        "variants": { "production": {} }
    }))
    .expect("config");

    let err = file.resolve(Mode::Production).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPlugin { index: 1, .. }));
    assert!(err.to_string().contains("cleanOnceBeforeBuildPattern"));
}
