//! Priority-ordered goal arbitration.
use tileworld_core::{Action, CellContent, CellKind};

use super::{Decision, DecisionContext, Goal, GoalKind};
use crate::coverage::Region;

/// Immediate action for whatever the agent is standing on, if any.
///
/// - fuel resource and fuel below the refuel tolerance: refuel
/// - disposal site while carrying: deposit
/// - collectible with spare capacity: collect
pub fn local_interaction(ctx: &DecisionContext<'_>) -> Option<Action> {
    match ctx.local_content() {
        CellContent::FuelResource if ctx.wants_refuel() => Some(Action::Refuel),
        CellContent::DisposalSite if ctx.is_carrying() => Some(Action::Deposit),
        CellContent::Collectible(_) if ctx.has_capacity() => Some(Action::Collect),
        CellContent::FuelResource
        | CellContent::DisposalSite
        | CellContent::Collectible(_)
        | CellContent::Empty => None,
    }
}

/// Selects the single active goal (or immediate action) for this tick.
pub struct GoalSelector;

impl GoalSelector {
    /// Runs arbitration for one tick.
    ///
    /// # Decision Process
    ///
    /// 1. **Local interaction**: act on the current cell, skipping planning
    /// 2. **Unknown fuel**: explore the region until the fuel resource is sensed
    /// 3. **Fuel emergency**: head for fuel, overriding any task
    /// 4. **Task**: deposit if carrying and a disposal site is sensed, else
    ///    collect if there is room and a collectible is sensed
    /// 5. **Fallback**: continue the region patrol
    ///
    /// The region's patrol cursor is updated every tick that reaches step 2,
    /// so a waypoint the agent walks over while busy is still retired.
    pub fn select(ctx: &DecisionContext<'_>, region: &mut Region) -> Decision {
        let position = ctx.position();

        tracing::debug!(
            "GoalSelector: pos={}, fuel={}, carried={}/{}, fuel_known={}",
            position,
            ctx.agent.fuel_level(),
            ctx.agent.carried(),
            ctx.config.max_carried,
            ctx.fuel.is_known()
        );

        // ====================================================================
        // Priority 1: Local Interaction
        // ====================================================================

        if let Some(action) = local_interaction(ctx) {
            tracing::debug!("  → Act: {} (standing on object)", action.label());
            return Decision::Act(action);
        }

        let patrol = region.patrol_target(position, ctx.belief);

        // ====================================================================
        // Priority 2: Unknown Fuel Resource
        // ====================================================================

        let Some(station) = ctx.fuel_location() else {
            tracing::debug!("  → Goal: Explore {} (fuel resource unknown)", patrol);
            return Decision::pursue(Goal::new(GoalKind::Explore, patrol));
        };

        // ====================================================================
        // Priority 3: Fuel Emergency
        // ====================================================================

        if ctx.fuel_emergency(station) {
            tracing::debug!(
                "  → Goal: Refuel {} (fuel={}, distance={})",
                station,
                ctx.agent.fuel_level(),
                ctx.agent.distance_to(station)
            );
            return Decision::pursue(Goal::new(GoalKind::Refuel, station));
        }

        // ====================================================================
        // Priority 4: Task Goal
        // ====================================================================

        if ctx.is_carrying()
            && let Some(site) = ctx.nearest(CellKind::DisposalSite)
        {
            tracing::debug!("  → Goal: Deposit {}", site);
            return Decision::pursue(Goal::new(GoalKind::Deposit, site));
        }

        if ctx.has_capacity()
            && let Some(object) = ctx.nearest(CellKind::Collectible)
        {
            tracing::debug!("  → Goal: Collect {}", object);
            return Decision::pursue(Goal::new(GoalKind::Collect, object));
        }

        // ====================================================================
        // Default: Patrol
        // ====================================================================

        tracing::debug!("  → Goal: Patrol {} (no task in sensor range)", patrol);
        Decision::pursue(Goal::new(GoalKind::Patrol, patrol))
    }
}
