//! Settlement scenarios driven through `Round` and the `Aggregator`.

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use fairway::engine::{Aggregator, TeamShare};
    use fairway::formats::{Alabama, DoDa, DoDaMode, FourBallMatch, IndividualMatch, Outcome, Skins};
    use fairway::round::Round;
    use fairway::types::{Money, ScoreToken};

    use crate::fixtures::{id, ids, RoundBuilder};

    fn head_to_head(round: &mut Round, per_hole: Money, per_birdie: Money, press: bool) {
        let m = IndividualMatch::new(id("ann"), id("bob"), per_hole, per_birdie, press).unwrap();
        round.add_bet(m.into(), None).unwrap();
    }

    fn total(round: &Round, player: &str) -> Money {
        round.settle(&Aggregator::default()).ledger.total_for(&id(player))
    }

    // -- Individual match ---------------------------------------------------

    #[test]
    fn test_individual_all_tied_is_zero() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .birdies("ann", &[2, 9, 11, 18])
            .birdies("bob", &[2, 9, 11, 18])
            .build();
        head_to_head(&mut round, dec!(2), dec!(5), true);

        assert_eq!(total(&round, "ann"), Money::ZERO);
        assert_eq!(total(&round, "bob"), Money::ZERO);
    }

    #[test]
    fn test_individual_three_birdies_worth_nine() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .birdies("ann", &[1, 2, 3])
            .build();
        head_to_head(&mut round, dec!(1), dec!(2), false);

        let report = round.settle(&Aggregator::default());
        assert_eq!(report.bets[0].outcome, Outcome::HeadToHead(dec!(9)));
        assert_eq!(report.ledger.total_for(&id("ann")), dec!(9));
        assert_eq!(report.ledger.total_for(&id("bob")), dec!(-9));
    }

    #[test]
    fn test_individual_press_doubles_front() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .birdies("ann", &[1, 2, 3, 9])
            .build();
        head_to_head(&mut round, dec!(1), dec!(2), true);
        assert_eq!(total(&round, "ann"), dec!(18));
    }

    #[test]
    fn test_individual_press_lost_zeroes_front() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .birdies("ann", &[1, 2, 3, 10])
            .birdies("bob", &[9])
            .build();
        head_to_head(&mut round, dec!(1), dec!(2), true);
        // Front wiped out; back keeps its +3 from hole 10.
        assert_eq!(total(&round, "ann"), dec!(3));
    }

    #[test]
    fn test_individual_press_hole_ignored_without_press() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .birdies("ann", &[1, 2, 3, 9, 18])
            .build();
        head_to_head(&mut round, dec!(1), dec!(2), false);
        assert_eq!(total(&round, "ann"), dec!(9));
    }

    #[test]
    fn test_individual_skips_unfinished_hole() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .score("ann", 1, ScoreToken::DidNotFinish)
            .birdies("bob", &[1])
            .score("bob", 2, ScoreToken::Absent)
            .build();
        head_to_head(&mut round, dec!(1), dec!(2), false);
        assert_eq!(total(&round, "bob"), Money::ZERO);
    }

    // -- Four-ball ----------------------------------------------------------

    fn four_ball_round() -> Round {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .par_player("cal")
            .par_player("dee")
            // Hole 1: one ball per team, ann's birdie beats cal's par.
            .score("bob", 1, ScoreToken::Absent)
            .score("dee", 1, ScoreToken::Absent)
            .birdies("ann", &[1])
            // Hole 2: team two has no ball at all; the hole is void.
            .score("cal", 2, ScoreToken::Absent)
            .score("dee", 2, ScoreToken::DidNotFinish)
            .birdies("ann", &[2])
            .build();
        let m = FourBallMatch::new(
            [id("ann"), id("bob")],
            [id("cal"), id("dee")],
            dec!(1),
            dec!(1),
            true,
        )
        .unwrap();
        round.add_bet(m.into(), None).unwrap();
        round
    }

    #[test]
    fn test_four_ball_lone_scores_and_void_holes() {
        let round = four_ball_round();
        let report = round.settle(&Aggregator::new(TeamShare::Full));
        assert_eq!(report.bets[0].outcome, Outcome::HeadToHead(dec!(2)));
        assert_eq!(report.ledger.total_for(&id("ann")), dec!(2));
        assert_eq!(report.ledger.total_for(&id("bob")), dec!(2));
        assert_eq!(report.ledger.total_for(&id("cal")), dec!(-2));
        assert_eq!(report.ledger.total_for(&id("dee")), dec!(-2));
    }

    #[test]
    fn test_four_ball_split_share() {
        let round = four_ball_round();
        let report = round.settle(&Aggregator::new(TeamShare::Split));
        assert_eq!(report.bets[0].outcome, Outcome::HeadToHead(dec!(2)));
        assert_eq!(report.ledger.total_for(&id("bob")), dec!(1));
        assert_eq!(report.ledger.total_for(&id("dee")), dec!(-1));
        assert_eq!(report.ledger.net(), Money::ZERO);
    }

    // -- Alabama ------------------------------------------------------------

    #[test]
    fn test_alabama_two_teams_negate() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .par_player("cal")
            .par_player("dee")
            .birdies("ann", &[1])
            .birdies("cal", &[10, 11])
            .build();
        let game = Alabama::new(
            vec![ids(&["ann", "bob"]), ids(&["cal", "dee"])],
            None,
            2,
            dec!(5),
            dec!(2),
            dec!(1),
        )
        .unwrap();
        round.add_bet(game.into(), None).unwrap();

        let ledger = round.settle(&Aggregator::default()).ledger;
        // Front +5 +2, back -5 -2, birdies 1 v 2.
        assert_eq!(ledger.total_for(&id("ann")), dec!(-1));
        assert_eq!(ledger.total_for(&id("bob")), dec!(-1));
        assert_eq!(ledger.total_for(&id("cal")), dec!(1));
        assert_eq!(ledger.total_for(&id("ann")), -ledger.total_for(&id("cal")));
        assert_eq!(ledger.net(), Money::ZERO);
    }

    #[test]
    fn test_alabama_floater_counts_for_every_team() {
        let build = |floater: bool| {
            let mut builder = RoundBuilder::new()
                .par_player("ann")
                .par_player("bob")
                .par_player("cal")
                .par_player("dee")
                .birdies("ann", &[1]);
            if floater {
                builder = builder.par_player("eve").score("eve", 1, 2u32);
            }
            let mut round = builder.build();
            let game = Alabama::new(
                vec![ids(&["ann", "bob"]), ids(&["cal", "dee"])],
                floater.then(|| id("eve")),
                1,
                dec!(5),
                dec!(2),
                Money::ZERO,
            )
            .unwrap();
            round.add_bet(game.into(), None).unwrap();
            round
        };

        // Without the floater, ann's birdie wins front total and front low.
        let ledger = build(false).settle(&Aggregator::default()).ledger;
        assert_eq!(ledger.total_for(&id("ann")), dec!(7));
        assert_eq!(ledger.total_for(&id("dee")), dec!(-7));

        // The floater's eagle is every team's low ball, so the front halves.
        let ledger = build(true).settle(&Aggregator::default()).ledger;
        assert_eq!(ledger.total_for(&id("ann")), Money::ZERO);
        assert_eq!(ledger.total_for(&id("dee")), Money::ZERO);
        assert_eq!(ledger.total_for(&id("eve")), Money::ZERO);
    }

    #[test]
    fn test_alabama_floater_books_last_team_result() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .par_player("cal")
            .par_player("dee")
            .par_player("eve")
            .birdies("ann", &[1])
            .build();
        let game = Alabama::new(
            vec![ids(&["ann", "bob"]), ids(&["cal", "dee"])],
            Some(id("eve")),
            2,
            dec!(5),
            dec!(2),
            dec!(1),
        )
        .unwrap();
        round.add_bet(game.into(), None).unwrap();

        let ledger = round.settle(&Aggregator::default()).ledger;
        // Front total +5, front low +2, birdies 1 v 0.
        assert_eq!(ledger.total_for(&id("ann")), dec!(8));
        assert_eq!(ledger.total_for(&id("bob")), dec!(8));
        assert_eq!(ledger.total_for(&id("cal")), dec!(-8));
        assert_eq!(ledger.total_for(&id("dee")), dec!(-8));
        // Even teams, but the floater carries the second team's loss too.
        assert_eq!(ledger.total_for(&id("eve")), dec!(-8));
        assert_eq!(ledger.net(), dec!(-8));
    }

    #[test]
    fn test_alabama_uneven_teams_not_zero_sum() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .par_player("cal")
            .birdies("ann", &[1])
            .build();
        let game = Alabama::new(
            vec![ids(&["ann", "bob"]), ids(&["cal"])],
            None,
            1,
            dec!(5),
            dec!(2),
            Money::ZERO,
        )
        .unwrap();
        round.add_bet(game.into(), None).unwrap();

        let ledger = round.settle(&Aggregator::default()).ledger;
        assert_eq!(ledger.total_for(&id("ann")), dec!(7));
        assert_eq!(ledger.total_for(&id("bob")), dec!(7));
        assert_eq!(ledger.total_for(&id("cal")), dec!(-7));
        assert_eq!(ledger.net(), dec!(7));
    }

    // -- Do-Da --------------------------------------------------------------

    fn do_da_round(mode: DoDaMode, amount: Money) -> Round {
        // Par 3s are holes 3, 7, 12 and 16.
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .par_player("cal")
            .idle_player("dee")
            .score("ann", 3, 2u32)
            .score("ann", 7, 2u32)
            .score("bob", 12, 2u32)
            .score("cal", 16, 2u32)
            .build();
        let game = DoDa::new(ids(&["ann", "bob", "cal", "dee"]), mode, amount).unwrap();
        round.add_bet(game.into(), Some("Deuces".into())).unwrap();
        round
    }

    #[test]
    fn test_do_da_per_unit() {
        let round = do_da_round(DoDaMode::PerUnit, dec!(1));
        let report = round.settle(&Aggregator::default());
        assert_eq!(report.ledger.total_for(&id("ann")), dec!(2));
        assert_eq!(report.ledger.total_for(&id("bob")), dec!(-1));
        assert_eq!(report.ledger.total_for(&id("cal")), dec!(-1));
        // Inactive: no entry, no payout.
        assert_eq!(report.bets[0].outcome.for_player(&id("dee")), Money::ZERO);
        assert_eq!(report.ledger.total_for(&id("dee")), Money::ZERO);
        assert_eq!(report.bets[0].title, "Deuces");
    }

    #[test]
    fn test_do_da_pool_is_zero_sum() {
        let round = do_da_round(DoDaMode::Pool, dec!(3));
        let ledger = round.settle(&Aggregator::default()).ledger;
        assert_eq!(ledger.total_for(&id("ann")), dec!(1.5));
        assert_eq!(ledger.total_for(&id("bob")), dec!(-0.75));
        assert_eq!(ledger.total_for(&id("cal")), dec!(-0.75));
        assert_eq!(ledger.net(), Money::ZERO);
    }

    // -- Skins --------------------------------------------------------------

    fn skins_round() -> Round {
        RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .par_player("cal")
            .par_player("dee")
            .idle_player("eve")
            .birdies("ann", &[1])
            .birdies("bob", &[2])
            .birdies("cal", &[3])
            // Hole 4 has an unfinished ball, so ann's birdie carries nothing.
            .birdies("ann", &[4])
            .score("dee", 4, ScoreToken::DidNotFinish)
            .build()
    }

    #[test]
    fn test_skins_pool_redistributed() {
        let mut round = skins_round();
        let game = Skins::new(ids(&["ann", "bob", "cal", "dee", "eve"]), dec!(6)).unwrap();
        round.add_bet(game.into(), None).unwrap();

        let ledger = round.settle(&Aggregator::default()).ledger;
        assert_eq!(ledger.total_for(&id("ann")), dec!(2));
        assert_eq!(ledger.total_for(&id("bob")), dec!(2));
        assert_eq!(ledger.total_for(&id("cal")), dec!(2));
        assert_eq!(ledger.total_for(&id("dee")), dec!(-6));
        assert_eq!(ledger.total_for(&id("eve")), Money::ZERO);
        assert_eq!(ledger.net(), Money::ZERO);
    }

    #[test]
    fn test_skins_none_won_keeps_entries() {
        let mut round = RoundBuilder::new()
            .par_player("ann")
            .par_player("bob")
            .par_player("cal")
            .build();
        let game = Skins::new(ids(&["ann", "bob", "cal"]), dec!(5)).unwrap();
        round.add_bet(game.into(), None).unwrap();

        let ledger = round.settle(&Aggregator::default()).ledger;
        assert_eq!(ledger.net(), dec!(-15));
        assert_eq!(ledger.total_for(&id("bob")), dec!(-5));
    }

    // -- Aggregation across formats -----------------------------------------

    #[test]
    fn test_player_total_matches_ledger() {
        let mut round = skins_round();
        let m = IndividualMatch::new(id("ann"), id("bob"), dec!(2), dec!(1), true).unwrap();
        round.add_bet(m.into(), None).unwrap();
        let fb = FourBallMatch::new([id("ann"), id("cal")], [id("bob"), id("dee")], dec!(1), dec!(0.5), false)
            .unwrap();
        round.add_bet(fb.into(), None).unwrap();
        let skins = Skins::new(ids(&["ann", "bob", "cal", "dee"]), dec!(6)).unwrap();
        round.add_bet(skins.into(), None).unwrap();

        let agg = Aggregator::new(TeamShare::Split);
        let report = round.settle(&agg);
        assert_eq!(report.bets.len(), 3);
        assert_eq!(report.ledger.net(), Money::ZERO);

        for player in ["ann", "bob", "cal", "dee", "eve"] {
            let single = agg.player_total(&id(player), &round.bets, &round.sheet, &round.tee_box);
            assert_eq!(single, report.ledger.total_for(&id(player)), "player {player}");
        }
        assert_eq!(report.ledger.total_for(&id("eve")), Money::ZERO);
    }
}
