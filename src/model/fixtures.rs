//! Builders shared by the unit tests.

use super::{AlterPunctuation, Participant, RaceRef, ResultRecord, Seat};

pub fn seat(id: u64, driver_id: u64, team_id: u64) -> Seat {
    Seat::new(
        id,
        Participant::new(driver_id, format!("Driver {}", driver_id)),
        Participant::new(team_id, format!("Team {}", team_id)),
    )
}

pub fn race(id: u64, round: u32) -> RaceRef {
    RaceRef::new(id, 2021, round)
}

pub fn race_with(id: u64, round: u32, modifier: AlterPunctuation) -> RaceRef {
    let mut race = race(id, round);
    race.alter_punctuation = Some(modifier);
    race
}

pub fn finished(race: RaceRef, seat: Seat, finish: u32) -> ResultRecord {
    let mut result = ResultRecord::new(race, seat);
    result.finish = Some(finish);
    result
}

pub fn qualified(race: RaceRef, seat: Seat, qualifying: u32, finish: Option<u32>) -> ResultRecord {
    let mut result = ResultRecord::new(race, seat);
    result.qualifying = Some(qualifying);
    result.finish = finish;
    result
}

pub fn retired(race: RaceRef, seat: Seat) -> ResultRecord {
    let mut result = ResultRecord::new(race, seat);
    result.retired = true;
    result
}
