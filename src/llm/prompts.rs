//! Prompt templates for the eight research stages and the synthesis fallback.

/// Problem / jobs-to-be-done decomposition
pub const PROBLEM_MAP_PROMPT: &str = r#"You are a ruthless product discovery expert.
Niche: {niche}; Geo: {geo}; Stage: {stage}; Founder: {founder_profile}; Constraints: {constraints}.
List top 5 concrete problems (pain × frequency × willingness to pay) as JSON:
[{{"problem":"...", "evidence":"(what makes it real)", "current_workaround":"...", "severity":1-5}}]
"#;

/// Market scan: segments, competitors, whitespace (reasoning only, no browsing)
pub const MARKET_SCAN_PROMPT: &str = r#"You are a market mapper. Niche: {niche}; Geo: {geo}.
Produce JSON with keys: segments (3-5), competitors (5-8, direct/indirect/substitute), whitespace (bullets).
"#;

pub const PERSONAS_PROMPT: &str = r#"Design 2-3 buyer/user personas for {niche} in {geo}.
Return JSON: [{{ "name": "...", "segment": "...", "primary_jobs":[], "top_pains":[], "must_have_outcomes":[] }}]
"#;

pub const SOLUTION_SHAPES_PROMPT: &str = r#"Propose 3 candidate solution shapes for {niche} given constraints: {constraints}.
Return JSON: [{{"name":"...", "v0_scope":["..."], "tradeoffs":["..."]}}]
"#;

pub const GTM_IDEAS_PROMPT: &str = r#"GTM for {niche} in {geo}. Constraints: {constraints}. Stage: {stage}.
Return JSON: {{"positioning":"...", "channels":["..."], "hooks":["..."], "partnerships":["..."]}}
"#;

/// MVP-first architecture, shaped by what the founder can build
pub const TECH_NOTES_PROMPT: &str = r#"Propose an MVP-first architecture for {niche} considering founder skills: {founder_profile}.
Return JSON: {{"architecture":"...", "stack_choices":["..."], "ai_components":["..."], "data_sources":["..."], "security_compliance":"...", "scaling_plan":"...", "build_vs_buy":["..."]}}
"#;

pub const OPS_NOTES_PROMPT: &str = r#"Outline ops & compliance for {niche} in {geo}. Stage: {stage}.
Return JSON: {{"team_plan":[{{"role":"...","seniority":"...","when":"now|later"}}], "processes":["..."], "legal_compliance":["..."], "tooling":["..."]}}
"#;

pub const RISKS_LIST_PROMPT: &str = r#"List top 8 risks for {niche} with likelihood and mitigation. JSON:
[{{"risk":"...", "likelihood":"low|med|high", "mitigation":"...", "owner":"founder|eng|ops|growth"}}]
"#;

/// Used when the synthesis template file is missing
pub const FALLBACK_SYNTHESIS_PROMPT: &str = r#"You are a startup strategist. Synthesize all inputs into a comprehensive strategy.

Niche: {niche}
Stage: {stage}
Geo: {geo}
Founder: {founder_profile}
Constraints: {constraints}
12-week goals: {goals}

Problem map: {problem_map}
Market scan: {market_scan}
Personas: {personas}
Solution shapes: {solution_shapes}
GTM ideas: {gtm_ideas}
Tech notes: {tech_notes}
Ops notes: {ops_notes}
Risks: {risks_list}

Output valid JSON with: assumptions, one_liner, problem_statement, target_personas, market, solution, tech, gtm, ops, metrics, finance, risks_and_mitigations, execution_board.
"#;
