//! Output row types, one per extracted table.  All columns are text.

use tp_output::table_row;

table_row! {
    /// A bus dwell at a stop facility: arrival paired with departure.
    pub struct BusDelayRow("bus_delay_at_facilities") {
        vehicle_id   => "vehicleId",
        vehicle_type => "vehicleType",
        facility     => "facility",
        arr_delay    => "arrDelay",
        dep_delay    => "depDelay",
        arr_time     => "arrTime",
        dep_time     => "depTime",
    }
}

table_row! {
    /// A non-driver person boarding a bus.
    pub struct BoardingRow("person_enter_bus") {
        person_id  => "person_id",
        vehicle_id => "vehicle_id",
    }
}

table_row! {
    /// A departure→activity trip that used at least one vehicle.
    pub struct TravelTimeRow("travel_time_all_vehicle") {
        /// `;`-joined vehicle ids in boarding order.
        veh_ids     => "vehIdList",
        /// `;`-joined vehicle types, parallel to `veh_ids`.
        veh_types   => "vehicleTypeList",
        main_mode   => "mainMode",
        start_time  => "startTime",
        travel_time => "travelTime",
    }
}

table_row! {
    /// An activity-to-activity person trip with origin and destination zones.
    pub struct PersonTripRow("people_trip") {
        veh_ids     => "vehIdList",
        veh_types   => "vehicleTypeList",
        main_mode   => "mainMode",
        travel_time => "travelTime",
        start_time  => "startTime",
        /// Type of the activity the trip starts from.
        act_start   => "actstart",
        /// Type of the activity the trip ends at.
        act_end     => "actend",
        origin_zone => "OZone",
        dest_zone   => "DZone",
        x_origin    => "xO",
        y_origin    => "yO",
        x_dest      => "xD",
        y_dest      => "yD",
    }
}

table_row! {
    /// One bus traversal of one link.
    pub struct BusLinkTripRow("bus_trip") {
        bus_id         => "busId",
        link_id        => "linkId",
        link_len       => "linkLen",
        have_passenger => "havePassenger",
        travel_time    => "travelTime",
    }
}
