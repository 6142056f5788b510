use domain_workflow::{
    exception::{WorkflowException, WorkflowResult},
    model::{
        entity::{callout::PipeSelection, lookup::MinimumIdSize},
        vo::{NominalSize, PipeAdjustments, PipeOptions, PipeSelectionFields},
    },
    repository::StoreTxn,
};
use uuid::Uuid;

/// Minimum-bore lookup assigned when a pipe is chosen and the caller
/// supplies none. Created on demand inside the caller's transaction.
const DEFAULT_MINIMUM_BORE: NominalSize = NominalSize::from_thousandths(2_000);

/// Gates callout pipe selections against hole-section constraints and
/// derives the default minimum bore. Stateless; runs inside the caller's
/// transaction so its adjustments commit or roll back with the owning write.
pub struct CompatibilityValidator;

impl CompatibilityValidator {
    /// Normalize and validate `fields` in place, returning the adjustments
    /// applied. Re-applying to an already-valid selection is a no-op.
    pub async fn apply(
        txn: &mut dyn StoreTxn,
        fields: &mut PipeSelectionFields,
    ) -> WorkflowResult<PipeAdjustments> {
        let mut adjustments = PipeAdjustments::default();

        if let Some(section_id) = fields.hole_section_id {
            txn.hole_section(section_id)
                .await?
                .ok_or(WorkflowException::NotFound { entity: "hole section", id: section_id })?;
        }

        let pipe_size = match fields.selection {
            PipeSelection::None => {
                adjustments.cleared_casing = fields.casing_size_id.take().is_some();
                adjustments.cleared_drillpipe = fields.drillpipe_size_id.take().is_some();
                return Ok(adjustments);
            }
            PipeSelection::Casing => {
                adjustments.cleared_drillpipe = fields.drillpipe_size_id.take().is_some();
                let id = fields
                    .casing_size_id
                    .ok_or(WorkflowException::MissingPipeSize { kind: "casing" })?;
                let casing = txn
                    .casing_size(id)
                    .await?
                    .ok_or(WorkflowException::NotFound { entity: "casing size", id })?;
                if let Some(section_id) = fields.hole_section_id {
                    if let Some(relationship) = txn.relationship_of(section_id).await? {
                        if !relationship.casing_size_ids.contains(&id) {
                            return Err(WorkflowException::IncompatiblePipeSize {
                                kind: "casing",
                                size: casing.size,
                                hole_section_id: section_id,
                            });
                        }
                    }
                }
                casing.size
            }
            PipeSelection::Drillpipe => {
                adjustments.cleared_casing = fields.casing_size_id.take().is_some();
                let id = fields
                    .drillpipe_size_id
                    .ok_or(WorkflowException::MissingPipeSize { kind: "drillpipe" })?;
                let drillpipe = txn
                    .drillpipe_size(id)
                    .await?
                    .ok_or(WorkflowException::NotFound { entity: "drillpipe size", id })?;
                if let Some(section_id) = fields.hole_section_id {
                    if let Some(relationship) = txn.relationship_of(section_id).await? {
                        if !relationship.drillpipe_size_ids.contains(&id) {
                            return Err(WorkflowException::IncompatiblePipeSize {
                                kind: "drillpipe",
                                size: drillpipe.size,
                                hole_section_id: section_id,
                            });
                        }
                    }
                }
                drillpipe.size
            }
        };

        let minimum = match fields.minimum_id_size_id {
            Some(id) => txn
                .minimum_id_size(id)
                .await?
                .ok_or(WorkflowException::NotFound { entity: "minimum id size", id })?,
            None => {
                let minimum = Self::default_minimum_bore(txn).await?;
                adjustments.defaulted_minimum_id = Some(minimum.id);
                fields.minimum_id_size_id = Some(minimum.id);
                minimum
            }
        };
        if minimum.size >= pipe_size {
            return Err(WorkflowException::MinimumBoreTooLarge {
                minimum: minimum.size,
                pipe: pipe_size,
            });
        }

        Ok(adjustments)
    }

    /// Pipe sizes offered for a hole section. With an allow-list these are
    /// its members; without one the listing falls back to sizes strictly
    /// smaller than the section's own parsed size. The fallback is advisory
    /// only and never gates writes.
    pub async fn pipe_options(
        txn: &dyn StoreTxn,
        hole_section_id: Uuid,
    ) -> WorkflowResult<PipeOptions> {
        let section = txn
            .hole_section(hole_section_id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "hole section", id: hole_section_id })?;

        let mut options = match txn.relationship_of(hole_section_id).await? {
            Some(relationship) => {
                let mut casing = Vec::new();
                for id in relationship.casing_size_ids {
                    if let Some(size) = txn.casing_size(id).await? {
                        casing.push(size);
                    }
                }
                let mut drillpipe = Vec::new();
                for id in relationship.drillpipe_size_ids {
                    if let Some(size) = txn.drillpipe_size(id).await? {
                        drillpipe.push(size);
                    }
                }
                PipeOptions { casing, drillpipe }
            }
            None => {
                let Some(limit) = NominalSize::parse(&section.name) else {
                    return Ok(PipeOptions::default());
                };
                PipeOptions {
                    casing: txn
                        .casing_sizes()
                        .await?
                        .into_iter()
                        .filter(|casing| casing.size < limit)
                        .collect(),
                    drillpipe: txn
                        .drillpipe_sizes()
                        .await?
                        .into_iter()
                        .filter(|drillpipe| drillpipe.size < limit)
                        .collect(),
                }
            }
        };
        options.casing.sort_by_key(|casing| casing.size);
        options.drillpipe.sort_by_key(|drillpipe| drillpipe.size);
        Ok(options)
    }

    async fn default_minimum_bore(txn: &mut dyn StoreTxn) -> WorkflowResult<MinimumIdSize> {
        if let Some(existing) = txn.minimum_id_by_size(DEFAULT_MINIMUM_BORE).await? {
            return Ok(existing);
        }
        let created = MinimumIdSize {
            id: Uuid::new_v4(),
            size: DEFAULT_MINIMUM_BORE,
            label: "2\"".to_owned(),
        };
        txn.insert_minimum_id_size(created.clone()).await?;
        Ok(created)
    }
}
