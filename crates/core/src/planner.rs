//! The two request pipelines: encode, prompt, call, extract.

use std::sync::Arc;

use crate::arrangement;
use crate::error::CoreError;
use crate::extract;
use crate::gateway::{InferenceGateway, InferenceRequest};
use crate::layout::{LayoutDecision, LayoutId};
use crate::placement::AssetPlacement;
use crate::preferences::{self, Preferences};
use crate::prompts;

/// Model variants used for each call; they are chosen independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub selection: String,
    pub arrangement: String,
}

/// Runs layout selection and arrangement shuffles against a gateway.
#[derive(Clone)]
pub struct RoomPlanner {
    gateway: Arc<dyn InferenceGateway>,
    models: ModelSelection,
}

impl RoomPlanner {
    pub fn new(gateway: Arc<dyn InferenceGateway>, models: ModelSelection) -> Self {
        Self { gateway, models }
    }

    pub fn models(&self) -> &ModelSelection {
        &self.models
    }

    /// Ask the model to pick a layout preset for the given preferences.
    pub async fn select_layout(&self, prefs: &Preferences) -> Result<LayoutDecision, CoreError> {
        let content = preferences::describe(prefs);

        let raw = self
            .gateway
            .generate(InferenceRequest {
                model: &self.models.selection,
                system_instruction: Some(prompts::SELECTION_INSTRUCTION.as_str()),
                content: &content,
            })
            .await?;
        tracing::debug!(raw = %raw, "Layout selection raw output");

        let decision = extract::parse_layout_decision(&raw)?;
        tracing::info!(layout_id = %decision.layout_id, "Layout selected");
        Ok(decision)
    }

    /// Ask the model to rearrange `placements` in the style of `layout`.
    ///
    /// The answer must satisfy every invariant in [`arrangement::verify`];
    /// a non-conforming answer is an error, not a partial result.
    pub async fn shuffle_arrangement(
        &self,
        layout: LayoutId,
        placements: &[AssetPlacement],
    ) -> Result<Vec<AssetPlacement>, CoreError> {
        let content = prompts::arrangement_prompt(layout, placements)?;

        let raw = self
            .gateway
            .generate(InferenceRequest {
                model: &self.models.arrangement,
                system_instruction: None,
                content: &content,
            })
            .await?;
        tracing::debug!(raw = %raw, "Arrangement raw output");

        let proposed = extract::parse_placements(&raw)?;
        let accepted = arrangement::verify(placements, proposed)?;
        tracing::info!(%layout, assets = accepted.len(), "Arrangement shuffled");
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::gateway::GatewayError;
    use crate::preferences::{Lighting, Mood, ProductivityGoal};

    /// Records the last request and answers with a fixed reply.
    struct CannedGateway {
        reply: Result<String, u16>,
        seen: Mutex<Vec<(String, Option<String>, String)>>,
    }

    impl CannedGateway {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl InferenceGateway for CannedGateway {
        async fn generate(&self, request: InferenceRequest<'_>) -> Result<String, GatewayError> {
            self.seen.lock().unwrap().push((
                request.model.to_string(),
                request.system_instruction.map(str::to_string),
                request.content.to_string(),
            ));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(GatewayError::Api {
                    status: *status,
                    body: "nope".into(),
                }),
            }
        }
    }

    fn models() -> ModelSelection {
        ModelSelection {
            selection: "select-model".into(),
            arrangement: "arrange-model".into(),
        }
    }

    fn focused_calm_warm() -> Preferences {
        Preferences {
            productivity_goal: ProductivityGoal::Focused,
            mood: Mood::Calm,
            lighting: Lighting::Warm,
        }
    }

    #[tokio::test]
    async fn select_layout_end_to_end() {
        let gateway = CannedGateway::ok(
            "```json\n{\"layoutId\":\"Calm\",\"explanation\":\"Calm fits a focused, low-stimulation workspace.\"}\n```",
        );
        let planner = RoomPlanner::new(gateway.clone(), models());

        let decision = planner.select_layout(&focused_calm_warm()).await.unwrap();

        assert_eq!(decision.layout_id, LayoutId::Calm);
        assert_eq!(
            decision.explanation,
            "Calm fits a focused, low-stimulation workspace."
        );

        let seen = gateway.seen.lock().unwrap();
        let (model, system, content) = &seen[0];
        assert_eq!(model, "select-model");
        assert!(system.as_deref().unwrap().contains("Grounded Retreat"));
        assert_eq!(
            content,
            "Between being focused and creative, my productivity style is Focused. \
             Between being calm and energetic, my energy level is Calm. \
             And I prefer Warm lighting in my workspace."
        );
    }

    #[tokio::test]
    async fn select_layout_surfaces_gateway_error() {
        let planner = RoomPlanner::new(CannedGateway::failing(503), models());
        let err = planner.select_layout(&focused_calm_warm()).await.unwrap_err();
        assert_matches!(err, CoreError::Gateway(GatewayError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn shuffle_uses_arrangement_model_without_system_instruction() {
        let input = vec![AssetPlacement {
            asset_id: "bed1".into(),
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: None,
        }];
        let gateway = CannedGateway::ok(
            r#"[{"asset_id":"bed1","position":[0.5,0,-0.5],"rotation":[0,3.14159265359,0],"scale":null}]"#,
        );
        let planner = RoomPlanner::new(gateway.clone(), models());

        let out = planner
            .shuffle_arrangement(LayoutId::Sample, &input)
            .await
            .unwrap();
        assert_eq!(out[0].position, [0.5, 0.0, -0.5]);

        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen[0].0, "arrange-model");
        assert!(seen[0].1.is_none());
        assert!(seen[0].2.contains("\"bed1\""));
    }

    #[tokio::test]
    async fn shuffle_rejects_mismatched_desk_and_chair() {
        let input = vec![
            AssetPlacement {
                asset_id: "desk".into(),
                position: [0.0, 0.0, 0.0],
                rotation: [0.0, 0.0, 0.0],
                scale: None,
            },
            AssetPlacement {
                asset_id: "chair".into(),
                position: [0.4, 0.0, 0.0],
                rotation: [0.0, 0.0, 0.0],
                scale: None,
            },
        ];
        let gateway = CannedGateway::ok(
            r#"[
                {"asset_id":"desk","position":[-0.5,0,0.5],"rotation":[0,0,0]},
                {"asset_id":"chair","position":[-0.2,0,0.5],"rotation":[0,1.57079632679,0]}
            ]"#,
        );
        let planner = RoomPlanner::new(gateway, models());

        let err = planner
            .shuffle_arrangement(LayoutId::Energetic, &input)
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::MalformedOutput(msg) if msg.contains("rotation.y"));
    }
}
