//! Tests for SimNavAgent.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use bevy::prelude::*;

    use crate::navigation::{NavSurface, NavigationAgent, SimNavAgent};

    fn agent_at(position: Vec3) -> SimNavAgent {
        SimNavAgent::new(NavSurface::square(20.0), position)
    }

    #[test]
    fn test_spawn_off_surface_is_not_navigable() {
        let agent = agent_at(Vec3::new(0.0, 10.0, 0.0));
        assert!(!agent.is_on_navigable_surface());
    }

    #[test]
    fn test_path_pending_until_next_advance() {
        let mut agent = agent_at(Vec3::ZERO);
        agent.set_destination(Vec3::new(5.0, 0.0, 0.0));
        assert!(agent.path_pending());
        assert_eq!(agent.remaining_distance(), 0.0);

        agent.advance(0.1);
        assert!(!agent.path_pending());
        assert!(agent.position().x > 0.0);
    }

    #[test]
    fn test_latency_keeps_old_path_while_pending() {
        let mut agent = agent_at(Vec3::ZERO).with_path_latency(0);
        agent.set_speed(1.0);
        agent.set_destination(Vec3::new(5.0, 0.0, 0.0));

        let mut agent = agent.with_path_latency(3);
        agent.set_destination(Vec3::new(-5.0, 0.0, 0.0));

        // Новый путь ещё считается: идём по старому
        agent.advance(1.0);
        assert!(agent.path_pending());
        assert_relative_eq!(agent.position().x, 1.0);
    }

    #[test]
    fn test_advance_does_not_overshoot() {
        let mut agent = agent_at(Vec3::ZERO).with_path_latency(0);
        agent.set_speed(10.0);
        agent.set_destination(Vec3::new(2.0, 0.0, 0.0));

        agent.advance(1.0);
        assert_relative_eq!(agent.position().x, 2.0);
        assert_relative_eq!(agent.remaining_distance(), 0.0);
        assert_relative_eq!(agent.velocity().length(), 2.0);

        agent.advance(1.0);
        assert_eq!(agent.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_stopped_agent_keeps_path_but_does_not_move() {
        let mut agent = agent_at(Vec3::ZERO).with_path_latency(0);
        agent.set_destination(Vec3::new(5.0, 0.0, 0.0));
        agent.set_stopped(true);

        agent.advance(1.0);
        assert_eq!(agent.position(), Vec3::ZERO);
        assert_eq!(agent.velocity(), Vec3::ZERO);
        assert_relative_eq!(agent.remaining_distance(), 5.0);

        agent.set_stopped(false);
        agent.advance(0.5);
        assert!(agent.position().x > 0.0);
    }

    #[test]
    fn test_destination_is_clamped_to_surface() {
        let mut agent = agent_at(Vec3::ZERO).with_path_latency(0);
        agent.set_destination(Vec3::new(100.0, 3.0, 0.0));
        assert_eq!(agent.destination(), Some(Vec3::new(20.0, 0.0, 0.0)));
    }

    #[test]
    fn test_snap_respects_radius() {
        let agent = agent_at(Vec3::ZERO);
        let far = Vec3::new(30.0, 0.0, 0.0);

        assert_eq!(agent.snap_to_nearest(far, 5.0), None);
        assert_eq!(
            agent.snap_to_nearest(far, 15.0),
            Some(Vec3::new(20.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_warp_onto_surface_restores_navigation() {
        let mut agent = agent_at(Vec3::new(0.0, 10.0, 0.0));
        agent.warp(Vec3::new(1.0, 0.0, 1.0));

        assert!(agent.is_on_navigable_surface());
        assert_eq!(agent.destination(), None);
    }

    #[test]
    fn test_surface_change_leaves_agent_off_mesh() {
        let mut agent = agent_at(Vec3::ZERO).with_path_latency(0);
        agent.set_destination(Vec3::new(5.0, 0.0, 0.0));

        agent.set_surface(NavSurface::new(Vec2::splat(10.0), Vec2::splat(20.0), 0.0));
        assert!(!agent.is_on_navigable_surface());

        // Путь сохранён, но агент стоит
        assert_eq!(agent.advance(1.0), Vec3::ZERO);
        assert_eq!(agent.destination(), Some(Vec3::new(5.0, 0.0, 0.0)));

        agent.set_surface(NavSurface::square(20.0));
        assert!(agent.is_on_navigable_surface());
        assert!(agent.advance(1.0).x > 0.0);
    }
}
