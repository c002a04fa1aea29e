//! The curated conflict database and compatibility matrix.
//!
//! Both are read-only process-wide constants built once on first access and
//! never mutated. Sources: upstream GitHub issues, release notes, and
//! community reports for the major AI frameworks.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::compat::{CompatRange, CompatibilityTable};
use crate::rule::{ConflictRule, Severity};

fn versions(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(name, spec)| (name.to_string(), spec.to_string()))
        .collect()
}

fn rule(
    id: &str,
    packages: &[&str],
    description: &str,
    severity: Severity,
    working: &[(&str, &str)],
    alternative: &[(&str, &str)],
    fix: &str,
) -> ConflictRule {
    ConflictRule {
        id: id.to_string(),
        packages: packages.iter().map(|p| p.to_string()).collect(),
        description: description.to_string(),
        severity,
        working_versions: versions(working),
        alternative: versions(alternative),
        fix: fix.to_string(),
        tip: None,
    }
}

static CONFLICT_RULES: LazyLock<Vec<ConflictRule>> = LazyLock::new(build_rules);

static COMPATIBILITY_MATRIX: LazyLock<CompatibilityTable> = LazyLock::new(build_matrix);

/// The ordered list of known conflicts. Evaluation preserves this order.
pub fn conflict_rules() -> &'static [ConflictRule] {
    &CONFLICT_RULES
}

/// The range-keyed framework compatibility matrix.
pub fn compatibility_matrix() -> &'static CompatibilityTable {
    &COMPATIBILITY_MATRIX
}

fn build_rules() -> Vec<ConflictRule> {
    vec![
        ConflictRule {
            tip: Some(
                "Upgrading both frameworks together is usually less painful than pinning back."
                    .to_string(),
            ),
            ..rule(
                "langchain-llama-sqlalchemy",
                &["langchain", "llama-index"],
                "LangChain >=0.0.200 requires SQLAlchemy >=2.0, but LlamaIndex <0.8 requires SQLAlchemy >=1.4,<2.0",
                Severity::Critical,
                &[("langchain", "==0.0.198"), ("llama-index", "==0.7.5")],
                &[("langchain", ">=0.1.0"), ("llama-index", ">=0.8.0")],
                "pip install langchain==0.0.198 llama-index==0.7.5\nOR upgrade both:\npip install langchain>=0.1.0 llama-index>=0.8.0",
            )
        },
        rule(
            "langchain-community-langsmith",
            &["langchain", "langchain-community"],
            "LangChain 0.1.6 depends on langsmith<0.1, but langchain-community 0.0.28+ depends on langsmith>=0.1.0",
            Severity::Critical,
            &[("langchain", "==0.1.7"), ("langchain-community", "==0.0.28")],
            &[],
            "pip install langchain==0.1.7 langchain-community==0.0.28",
        ),
        rule(
            "llama-index-langchain-version",
            &["llama-index", "langchain"],
            "LlamaIndex 0.5.x pins langchain==0.0.142, conflicts with newer LangChain versions",
            Severity::Critical,
            &[("llama-index", "==0.5.27"), ("langchain", "==0.0.142")],
            &[("llama-index", ">=0.6.0"), ("langchain", ">=0.0.154")],
            "pip install llama-index==0.5.27 langchain==0.0.142\nOR upgrade both:\npip install llama-index>=0.6.8 langchain>=0.0.154",
        ),
        rule(
            "openai-langchain-breaking",
            &["openai", "langchain"],
            "OpenAI SDK 1.0+ has breaking API changes, older LangChain versions incompatible",
            Severity::High,
            &[("openai", "==0.28.1"), ("langchain", "==0.0.330")],
            &[("openai", ">=1.0.0"), ("langchain", ">=0.1.0")],
            "pip install openai==0.28.1 langchain==0.0.330\nOR upgrade both:\npip install openai>=1.0.0 langchain>=0.1.0",
        ),
        rule(
            "llama-index-openai-version",
            &["llama-index", "openai"],
            "LlamaIndex <0.9.0 requires openai<1.0, breaks with OpenAI 1.0+",
            Severity::High,
            &[("llama-index", "==0.8.69"), ("openai", "==0.28.1")],
            &[("llama-index", ">=0.9.0"), ("openai", ">=1.0.0")],
            "pip install llama-index==0.8.69 openai==0.28.1\nOR upgrade both:\npip install llama-index>=0.9.0 openai>=1.0.0",
        ),
        rule(
            "crewai-llama-embedchain",
            &["crewai", "llama-index"],
            "CrewAI 0.121+ introduces transitive dependency on embedchain, conflicts with llama-index 0.10.x",
            Severity::High,
            &[("crewai", "==0.100.1"), ("llama-index", "==0.10.51")],
            &[("crewai", ">=0.121.0"), ("llama-index", ">=0.12.38")],
            "pip install crewai==0.100.1 llama-index==0.10.51\nOR upgrade both:\npip install crewai>=0.121.0 llama-index>=0.12.38",
        ),
        ConflictRule {
            tip: Some(
                "Faster with uv: replace 'pip' with 'uv pip' for a 10x speedup.".to_string(),
            ),
            ..rule(
                "langchain-openai-separate-package",
                &["langchain", "openai"],
                "LangChain 0.2+ moved OpenAI integration to separate langchain-openai package",
                Severity::Medium,
                &[
                    ("langchain", ">=0.2.0"),
                    ("langchain-openai", ">=0.1.0"),
                    ("openai", ">=1.0.0"),
                ],
                &[],
                "pip install langchain>=0.2.0 langchain-openai>=0.1.0 openai>=1.0.0",
            )
        },
        rule(
            "pydantic-v2-breaking",
            &["pydantic", "langchain", "llama-index"],
            "Pydantic V2 (2.0+) has breaking changes, many AI frameworks not compatible",
            Severity::High,
            &[
                ("pydantic", "==1.10.13"),
                ("langchain", "==0.0.330"),
                ("llama-index", "==0.8.69"),
            ],
            &[
                ("pydantic", ">=2.0.0"),
                ("langchain", ">=0.1.0"),
                ("llama-index", ">=0.9.0"),
            ],
            "pip install pydantic==1.10.13 langchain==0.0.330 llama-index==0.8.69\nOR upgrade all:\npip install pydantic>=2.0.0 langchain>=0.1.0 llama-index>=0.9.0",
        ),
        rule(
            "numpy-scipy-torch-version",
            &["numpy", "torch", "transformers"],
            "PyTorch and Transformers have specific NumPy version requirements",
            Severity::Medium,
            &[
                ("numpy", ">=1.21.0,<2.0.0"),
                ("torch", ">=2.0.0"),
                ("transformers", ">=4.30.0"),
            ],
            &[],
            "pip install 'numpy>=1.21.0,<2.0.0' torch>=2.0.0 transformers>=4.30.0",
        ),
        rule(
            "langflow-llama-sqlalchemy",
            &["langflow", "llama-index"],
            "Langflow depends on SQLAlchemy 1.4.x, LlamaIndex 0.7.5+ needs SQLAlchemy >=2.0.15",
            Severity::Critical,
            &[("langflow", "==0.5.0"), ("llama-index", "==0.7.4")],
            &[],
            "pip install langflow==0.5.0 'llama-index<0.7.5'",
        ),
        rule(
            "transformers-torch-version",
            &["transformers", "torch"],
            "Transformers 4.38+ requires torch>=1.13 for SDPA attention, older PyTorch builds fail at import",
            Severity::High,
            &[("transformers", "==4.30.2"), ("torch", "==2.0.1")],
            &[("transformers", ">=4.38.0"), ("torch", ">=2.1.0")],
            "pip install transformers==4.30.2 torch==2.0.1\nOR upgrade both:\npip install transformers>=4.38.0 torch>=2.1.0",
        ),
        ConflictRule {
            tip: Some(
                "On distros with an old system sqlite3, pysqlite3-binary is a drop-in workaround."
                    .to_string(),
            ),
            ..rule(
                "chromadb-sqlite-version",
                &["chromadb", "langchain"],
                "ChromaDB 0.4+ requires sqlite3 >=3.35, and LangChain <0.0.300 pins chromadb <0.4",
                Severity::High,
                &[("chromadb", "==0.3.29"), ("langchain", "==0.0.267")],
                &[("chromadb", ">=0.4.15"), ("langchain", ">=0.0.300")],
                "pip install chromadb==0.3.29 langchain==0.0.267\nOR upgrade both:\npip install chromadb>=0.4.15 langchain>=0.0.300",
            )
        },
        rule(
            "fastapi-pydantic-v2",
            &["fastapi", "pydantic"],
            "FastAPI <0.100 requires pydantic<2.0, breaks with Pydantic V2",
            Severity::High,
            &[("fastapi", "==0.99.1"), ("pydantic", "==1.10.13")],
            &[("fastapi", ">=0.100.0"), ("pydantic", ">=2.0.0")],
            "pip install fastapi==0.99.1 pydantic==1.10.13\nOR upgrade both:\npip install fastapi>=0.100.0 pydantic>=2.0.0",
        ),
        rule(
            "autogen-openai-version",
            &["autogen", "openai"],
            "AutoGen <0.2 targets the legacy OpenAI SDK, incompatible with openai 1.0+",
            Severity::High,
            &[("autogen", "==0.1.14"), ("openai", "==0.28.1")],
            &[("autogen", ">=0.2.0"), ("openai", ">=1.0.0")],
            "pip install autogen==0.1.14 openai==0.28.1\nOR upgrade both:\npip install autogen>=0.2.0 openai>=1.0.0",
        ),
        rule(
            "anthropic-langchain-tooluse",
            &["anthropic", "langchain"],
            "langchain-anthropic requires anthropic>=0.17, older Anthropic SDKs break tool-use message blocks",
            Severity::Medium,
            &[("anthropic", "==0.16.0"), ("langchain", "==0.1.9")],
            &[("anthropic", ">=0.17.0"), ("langchain", ">=0.1.10")],
            "pip install anthropic==0.16.0 langchain==0.1.9\nOR upgrade both:\npip install anthropic>=0.17.0 langchain>=0.1.10",
        ),
        rule(
            "crewai-pydantic-v2",
            &["crewai", "pydantic"],
            "CrewAI 0.28+ requires pydantic>=2.4, projects still on Pydantic V1 cannot install it",
            Severity::Medium,
            &[("crewai", ">=0.28.8"), ("pydantic", ">=2.4.0")],
            &[],
            "pip install crewai>=0.28.8 'pydantic>=2.4.0'",
        ),
        rule(
            "tensorflow-numpy-2",
            &["tensorflow", "numpy"],
            "NumPy 2.0 removed APIs TensorFlow <2.17 compiles against, import fails with _ARRAY_API errors",
            Severity::High,
            &[("tensorflow", "==2.16.1"), ("numpy", ">=1.23.0,<2.0.0")],
            &[("tensorflow", ">=2.17.0"), ("numpy", ">=2.0.0")],
            "pip install tensorflow==2.16.1 'numpy>=1.23.0,<2.0.0'\nOR upgrade both:\npip install tensorflow>=2.17.0 numpy>=2.0.0",
        ),
        rule(
            "sentence-transformers-pin",
            &["sentence-transformers", "transformers"],
            "sentence-transformers 2.x pins transformers<4.40, newer Transformers releases refuse to co-install",
            Severity::Medium,
            &[("sentence-transformers", "==2.7.0"), ("transformers", "==4.39.3")],
            &[("sentence-transformers", ">=3.0.0"), ("transformers", ">=4.41.0")],
            "pip install sentence-transformers==2.7.0 transformers==4.39.3\nOR upgrade both:\npip install sentence-transformers>=3.0.0 transformers>=4.41.0",
        ),
        rule(
            "gradio-fastapi-version",
            &["gradio", "fastapi"],
            "Gradio 4.x requires fastapi>=0.104, older FastAPI pins break the queueing API",
            Severity::Medium,
            &[("gradio", "==3.50.2"), ("fastapi", "==0.103.2")],
            &[("gradio", ">=4.0.0"), ("fastapi", ">=0.104.0")],
            "pip install gradio==3.50.2 fastapi==0.103.2\nOR upgrade both:\npip install gradio>=4.0.0 fastapi>=0.104.0",
        ),
        rule(
            "langchain-core-split",
            &["langchain", "langchain-core"],
            "LangChain 0.1+ splits core abstractions into langchain-core, mismatched pins break imports",
            Severity::Medium,
            &[("langchain", "==0.1.20"), ("langchain-core", "==0.1.52")],
            &[("langchain", ">=0.2.0"), ("langchain-core", ">=0.2.0")],
            "pip install langchain==0.1.20 langchain-core==0.1.52\nOR upgrade both:\npip install langchain>=0.2.0 langchain-core>=0.2.0",
        ),
        rule(
            "llama-index-core-split",
            &["llama-index", "llama-index-core"],
            "LlamaIndex 0.10 split into llama-index-core plus integration packages, pre-0.10 pins conflict with the meta-package",
            Severity::Medium,
            &[("llama-index", ">=0.10.0"), ("llama-index-core", ">=0.10.0")],
            &[],
            "pip install 'llama-index>=0.10.0' 'llama-index-core>=0.10.0'",
        ),
        rule(
            "crewai-tools-series",
            &["crewai", "crewai-tools"],
            "crewai-tools releases track crewai minor versions, mixing series breaks tool registration",
            Severity::Low,
            &[("crewai", "==0.41.1"), ("crewai-tools", "==0.4.26")],
            &[("crewai", ">=0.51.0"), ("crewai-tools", ">=0.8.3")],
            "pip install crewai==0.41.1 crewai-tools==0.4.26\nOR upgrade both:\npip install crewai>=0.51.0 crewai-tools>=0.8.3",
        ),
    ]
}

fn compat(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    pairs
        .iter()
        .map(|(name, specs)| {
            (
                name.to_string(),
                specs.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}

fn build_matrix() -> CompatibilityTable {
    let mut matrix = CompatibilityTable::new();

    matrix.insert(
        "langchain".to_string(),
        vec![
            CompatRange {
                versions: "0.0.142".to_string(),
                compatible: compat(&[
                    ("llama-index", &["0.5.x"]),
                    ("openai", &["0.27.x", "0.28.x"]),
                ]),
            },
            CompatRange {
                versions: "0.0.330".to_string(),
                compatible: compat(&[("openai", &["0.28.x"]), ("pydantic", &["1.10.x"])]),
            },
            CompatRange {
                versions: "0.1.0+".to_string(),
                compatible: compat(&[
                    ("openai", &["1.0+"]),
                    ("langchain-openai", &["0.1.0+"]),
                    ("pydantic", &["2.0+"]),
                ]),
            },
            CompatRange {
                versions: "0.2.0+".to_string(),
                compatible: compat(&[
                    ("langchain-openai", &["required"]),
                    ("langchain-community", &["0.2.0+"]),
                ]),
            },
        ],
    );

    matrix.insert(
        "llama-index".to_string(),
        vec![
            CompatRange {
                versions: "0.5.x".to_string(),
                compatible: compat(&[("langchain", &["0.0.142"]), ("sqlalchemy", &["1.4.x"])]),
            },
            CompatRange {
                versions: "0.6.x-0.7.x".to_string(),
                compatible: compat(&[("langchain", &[">=0.0.154"]), ("sqlalchemy", &["1.4.x"])]),
            },
            CompatRange {
                versions: "0.8.0+".to_string(),
                compatible: compat(&[("sqlalchemy", &[">=2.0"]), ("openai", &["0.28.x"])]),
            },
            CompatRange {
                versions: "0.9.0+".to_string(),
                compatible: compat(&[("openai", &["1.0+"]), ("pydantic", &["2.0+"])]),
            },
        ],
    );

    matrix.insert(
        "openai".to_string(),
        vec![
            CompatRange {
                versions: "0.28.x".to_string(),
                compatible: compat(&[("langchain", &["<0.1.0"]), ("llama-index", &["<0.9.0"])]),
            },
            CompatRange {
                versions: "1.0+".to_string(),
                compatible: compat(&[("langchain", &[">=0.1.0"]), ("llama-index", &[">=0.9.0"])]),
            },
        ],
    );

    matrix
}
